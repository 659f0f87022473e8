//! User vertices and their resume records

use super::types::{Skill, UserKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A job held by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    /// Always strictly after `start_date`
    pub end_date: NaiveDate,
}

/// A degree earned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub university: String,
    pub degree: String,
    pub major: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A user vertex with its full resume
///
/// Users carry:
/// - A stable key used for every graph lookup
/// - A display name (cosmetic, may collide across backends)
/// - A non-empty set of skills
/// - Zero or more positions and at least one education record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub key: UserKey,
    pub name: String,
    pub skills: BTreeSet<Skill>,
    pub positions: Vec<Position>,
    pub education: Vec<Education>,
}

impl User {
    /// Create a user with no resume records yet
    pub fn new(key: UserKey, name: impl Into<String>) -> Self {
        User {
            key,
            name: name.into(),
            skills: BTreeSet::new(),
            positions: Vec::new(),
            education: Vec::new(),
        }
    }

    /// Builder-style helper used mostly by tests and fixtures
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Skill>,
    {
        self.skills.extend(skills.into_iter().map(Into::into));
        self
    }

    /// Check if the user lists a skill
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s.as_str() == skill)
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_skills() {
        let user = User::new(UserKey::new(1), "Alice").with_skills(["Python", "Go", "Python"]);

        assert_eq!(user.skill_count(), 2);
        assert!(user.has_skill("Go"));
        assert!(!user.has_skill("Rust"));

        let ordered: Vec<&str> = user.skills.iter().map(|s| s.as_str()).collect();
        assert_eq!(ordered, vec!["Go", "Python"]);
    }

    #[test]
    fn test_user_serialization() {
        let mut user = User::new(UserKey::new(7), "Bob").with_skills(["Docker"]);
        user.positions.push(Position {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: NaiveDate::from_ymd_opt(2015, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2018, 6, 30).unwrap(),
        });

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["key"], 7);
        assert_eq!(json["skills"][0], "Docker");
        assert_eq!(json["positions"][0]["start_date"], "2015-03-01");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
