//! Built-in word-list attribute source

use super::{AttributeKind, AttributeSource};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Skill catalog used when the configuration does not provide one
pub const DEFAULT_SKILLS: [&str; 17] = [
    "Python",
    "Go",
    "Docker",
    "PostgreSQL",
    "Kubernetes",
    "React",
    "VueJS",
    "AWS",
    "GCP",
    "Azure",
    "Terraform",
    "CI/CD",
    "DevOps",
    "NextJS",
    "GenAI",
    "LangChain/LangGraph",
    "AI Agents",
];

const FIRST_NAMES: [&str; 40] = [
    "Alice", "Bob", "Carlos", "Diana", "Elena",
    "Frank", "Grace", "Hiro", "Isha", "Jake",
    "Kenji", "Luna", "Miguel", "Nina", "Oscar",
    "Priya", "Qian", "Rafael", "Sara", "Tomasz",
    "Uma", "Viktor", "Wendy", "Xavier", "Yuki",
    "Zara", "Aiden", "Bianca", "Chloe", "Derek",
    "Elias", "Fatima", "Gavin", "Hannah", "Ivan",
    "Jasmine", "Kai", "Lena", "Mateo", "Nadia",
];

const LAST_NAMES: [&str; 40] = [
    "Chen", "Patel", "Kim", "Nguyen", "Garcia",
    "Muller", "Tanaka", "Singh", "Okonkwo", "Williams",
    "Johansson", "Rossi", "Fernandez", "Kowalski", "Sato",
    "Ali", "Larsen", "Dubois", "Schmidt", "Park",
    "Jensen", "Costa", "Ito", "Bakker", "Novak",
    "Shah", "Rivera", "Yamamoto", "Andersen", "Gupta",
    "Mendez", "Petrov", "Suzuki", "Eriksson", "Torres",
    "Nakamura", "Lund", "Ortiz", "Hoffmann", "Reyes",
];

const COMPANIES: [&str; 20] = [
    "Google", "Meta", "Apple", "Amazon", "Microsoft",
    "Netflix", "Stripe", "Airbnb", "Uber", "Databricks",
    "Snowflake", "Confluent", "HashiCorp", "Datadog", "Figma",
    "Vercel", "Supabase", "PlanetScale", "Railway", "Fly.io",
];

const TITLES: [&str; 12] = [
    "Software Engineer", "Data Scientist", "Site Reliability Engineer",
    "Product Manager", "Engineering Manager", "Data Engineer",
    "Machine Learning Engineer", "Security Engineer", "Solutions Architect",
    "QA Engineer", "Frontend Developer", "Backend Developer",
];

const UNIVERSITIES: [&str; 12] = [
    "Stanford University", "Massachusetts Institute of Technology",
    "University of Cambridge", "ETH Zurich", "University of Toronto",
    "National University of Singapore", "Carnegie Mellon University",
    "University of Tokyo", "Technical University of Munich",
    "University of California, Berkeley", "Imperial College London",
    "Indian Institute of Technology Bombay",
];

const DEGREES: [&str; 3] = ["Bachelor", "Master", "PhD"];

const MAJORS: [&str; 9] = [
    "Artificial Intelligence",
    "Computer Science",
    "Data Science",
    "Information Technology",
    "Machine Learning",
    "Mathematics",
    "Robotics",
    "Statistical Learning",
    "Statistics",
];

/// Attribute source backed by fixed word lists
///
/// Names combine a first name, a middle initial and a last name, giving
/// 41 600 distinct values.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSource;

impl CatalogSource {
    pub fn new() -> Self {
        CatalogSource
    }

    /// Number of distinct values the source can produce for `kind`
    pub fn cardinality(kind: AttributeKind) -> usize {
        match kind {
            AttributeKind::Name => FIRST_NAMES.len() * 26 * LAST_NAMES.len(),
            AttributeKind::Company => COMPANIES.len(),
            AttributeKind::Title => TITLES.len(),
            AttributeKind::University => UNIVERSITIES.len(),
            AttributeKind::Degree => DEGREES.len(),
            AttributeKind::Major => MAJORS.len(),
        }
    }

    fn pick(list: &[&'static str], rng: &mut StdRng) -> String {
        list.choose(rng).copied().unwrap_or_default().to_string()
    }
}

impl AttributeSource for CatalogSource {
    fn next_value(&self, kind: AttributeKind, rng: &mut StdRng) -> String {
        match kind {
            AttributeKind::Name => {
                let first = Self::pick(&FIRST_NAMES, rng);
                let initial = char::from(b'A' + rng.gen_range(0..26u8));
                let last = Self::pick(&LAST_NAMES, rng);
                format!("{} {}. {}", first, initial, last)
            }
            AttributeKind::Company => Self::pick(&COMPANIES, rng),
            AttributeKind::Title => Self::pick(&TITLES, rng),
            AttributeKind::University => Self::pick(&UNIVERSITIES, rng),
            AttributeKind::Degree => Self::pick(&DEGREES, rng),
            AttributeKind::Major => Self::pick(&MAJORS, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_name_shape() {
        let source = CatalogSource::new();
        let mut rng = StdRng::seed_from_u64(7);
        let name = source.next_value(AttributeKind::Name, &mut rng);

        let parts: Vec<&str> = name.split(' ').collect();
        assert_eq!(parts.len(), 3);
        assert!(FIRST_NAMES.contains(&parts[0]));
        assert_eq!(parts[1].len(), 2);
        assert!(parts[1].ends_with('.'));
        assert!(LAST_NAMES.contains(&parts[2]));
    }

    #[test]
    fn test_values_come_from_lists() {
        let source = CatalogSource::new();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            assert!(MAJORS.contains(&source.next_value(AttributeKind::Major, &mut rng).as_str()));
            assert!(DEGREES.contains(&source.next_value(AttributeKind::Degree, &mut rng).as_str()));
            assert!(COMPANIES.contains(&source.next_value(AttributeKind::Company, &mut rng).as_str()));
        }
    }

    #[test]
    fn test_seeded_reproducibility() {
        let source = CatalogSource::new();
        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        for kind in AttributeKind::ALL {
            assert_eq!(source.next_value(kind, &mut a), source.next_value(kind, &mut b));
        }
    }

    #[test]
    fn test_cardinality() {
        assert_eq!(CatalogSource::cardinality(AttributeKind::Name), 41_600);
        assert_eq!(CatalogSource::cardinality(AttributeKind::Degree), 3);
    }
}
