//! Per-user resume attributes: skills, positions and education

use crate::attributes::{AttributeKind, AttributeSource};
use crate::config::{CountRange, GeneratorConfig};
use crate::graph::{Education, Position, Skill, User};
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Positions start within these years
const POSITION_START_YEARS: (i32, i32) = (2010, 2020);
/// Education starts within these years
const EDUCATION_START_YEARS: (i32, i32) = (2006, 2010);
/// Nothing ends after this year
const LAST_END_YEAR: i32 = 2024;

/// Populate skills, positions and education of a freshly keyed user
pub fn fill_resume(
    mut user: User,
    source: &dyn AttributeSource,
    config: &GeneratorConfig,
    catalog: &[String],
    rng: &mut StdRng,
) -> User {
    user.skills = draw_skills(catalog, config.skills_per_user, rng);

    let positions = draw_count(config.positions_per_user, rng);
    user.positions = (0..positions)
        .map(|_| {
            let (start_date, end_date) = draw_span(POSITION_START_YEARS, rng);
            Position {
                title: source.next_value(AttributeKind::Title, rng),
                company: source.next_value(AttributeKind::Company, rng),
                start_date,
                end_date,
            }
        })
        .collect();

    let degrees = draw_count(config.education_per_user, rng);
    user.education = (0..degrees)
        .map(|_| {
            let (start_date, end_date) = draw_span(EDUCATION_START_YEARS, rng);
            Education {
                university: source.next_value(AttributeKind::University, rng),
                degree: source.next_value(AttributeKind::Degree, rng),
                major: source.next_value(AttributeKind::Major, rng),
                start_date,
                end_date,
            }
        })
        .collect();

    user
}

fn draw_count(range: CountRange, rng: &mut StdRng) -> usize {
    rng.gen_range(range.min..=range.max)
}

/// Sample a non-empty, duplicate-free subset of the catalog
fn draw_skills(
    catalog: &[String],
    range: CountRange,
    rng: &mut StdRng,
) -> std::collections::BTreeSet<Skill> {
    let max = range.max.min(catalog.len());
    let min = range.min.min(max).max(1);
    let count = rng.gen_range(min..=max.max(min));
    catalog
        .choose_multiple(rng, count)
        .map(|s| Skill::new(s.as_str()))
        .collect()
}

/// A start date within `start_years` and an end date in a later year
fn draw_span(start_years: (i32, i32), rng: &mut StdRng) -> (NaiveDate, NaiveDate) {
    let start = random_date(rng.gen_range(start_years.0..=start_years.1), rng);
    let end_year = rng.gen_range(start.year() + 1..=LAST_END_YEAR.max(start.year() + 1));
    let end = random_date(end_year, rng);
    (start, end)
}

fn random_date(year: i32, rng: &mut StdRng) -> NaiveDate {
    // day 1..=365 exists in every year
    let ordinal = rng.gen_range(1..=365);
    NaiveDate::from_yo_opt(year, ordinal).unwrap_or(NaiveDate::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::CatalogSource;
    use crate::graph::UserKey;
    use rand::SeedableRng;

    fn catalog() -> Vec<String> {
        GeneratorConfig::default().skills
    }

    #[test]
    fn test_resume_respects_config() {
        let config = GeneratorConfig::default();
        let source = CatalogSource::new();
        let catalog = catalog();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let user = fill_resume(User::new(UserKey::new(1), "A"), &source, &config, &catalog, &mut rng);

            assert!(config.skills_per_user.contains(user.skills.len()));
            assert!(user.skills.iter().all(|s| catalog.iter().any(|c| c == s.as_str())));
            assert!(config.positions_per_user.contains(user.positions.len()));
            assert_eq!(user.education.len(), 1);

            for p in &user.positions {
                assert!(p.end_date > p.start_date);
                assert!((2010..=2020).contains(&p.start_date.year()));
                assert!(p.end_date.year() <= LAST_END_YEAR);
            }
            for e in &user.education {
                assert!(e.end_date > e.start_date);
                assert!((2006..=2010).contains(&e.start_date.year()));
            }
        }
    }

    #[test]
    fn test_skill_range_clamped_to_catalog() {
        let small: Vec<String> = vec!["Go".into(), "Rust".into()];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let skills = draw_skills(&small, CountRange::new(1, 10), &mut rng);
            assert!((1..=2).contains(&skills.len()));
        }

        let skills = draw_skills(&small, CountRange::new(5, 10), &mut rng);
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_span_ordering() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let (start, end) = draw_span((2024, 2024), &mut rng);
            assert!(end > start);
        }
    }
}
