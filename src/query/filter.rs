//! Resume filters
//!
//! Field matching over the nested resume document: skill containment
//! (all-of / any-of), a major on any education record, and a set of
//! constraints that one education record must satisfy together.

use crate::graph::{Education, User};
use serde::{Deserialize, Serialize};

/// Constraints that a single education record must satisfy together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationMatch {
    pub degree: Option<String>,
    pub major: Option<String>,
}

impl EducationMatch {
    pub fn matches(&self, record: &Education) -> bool {
        self.degree.as_ref().map_or(true, |d| record.degree == *d)
            && self.major.as_ref().map_or(true, |m| record.major == *m)
    }
}

/// Filter over resumes; every populated field must match
///
/// An empty filter matches every resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFilter {
    /// The resume lists every one of these skills
    pub skills_all: Vec<String>,
    /// The resume lists at least one of these skills
    pub skills_any: Vec<String>,
    /// Some education record has this major
    pub major: Option<String>,
    /// Some single education record satisfies all of these
    pub education: Option<EducationMatch>,
}

impl ResumeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills_all.push(skill.into());
        self
    }

    pub fn with_all_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills_all.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_any_skill<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills_any.extend(skills.into_iter().map(Into::into));
        self
    }

    pub fn with_major(mut self, major: impl Into<String>) -> Self {
        self.major = Some(major.into());
        self
    }

    pub fn with_education(mut self, degree: impl Into<String>, major: impl Into<String>) -> Self {
        self.education = Some(EducationMatch {
            degree: Some(degree.into()),
            major: Some(major.into()),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.skills_all.is_empty()
            && self.skills_any.is_empty()
            && self.major.is_none()
            && self.education.is_none()
    }

    pub fn matches(&self, user: &User) -> bool {
        if !self.skills_all.iter().all(|s| user.has_skill(s)) {
            return false;
        }
        if !self.skills_any.is_empty() && !self.skills_any.iter().any(|s| user.has_skill(s)) {
            return false;
        }
        if let Some(major) = &self.major {
            if !user.education.iter().any(|e| e.major == *major) {
                return false;
            }
        }
        if let Some(constraint) = &self.education {
            if !user.education.iter().any(|e| constraint.matches(e)) {
                return false;
            }
        }
        true
    }

    /// The demonstration filters run by `query-resumes`
    pub fn showcase() -> Vec<(&'static str, ResumeFilter)> {
        vec![
            (
                "Resumes with 'Python' as a skill",
                ResumeFilter::new().with_skill("Python"),
            ),
            (
                "Resumes with skills containing Python AND AWS",
                ResumeFilter::new().with_all_skills(["Python", "AWS"]),
            ),
            (
                "Resumes with skills containing Python OR AWS, AND a major in Statistics",
                ResumeFilter::new()
                    .with_any_skill(["Python", "AWS"])
                    .with_major("Statistics"),
            ),
            (
                "Resumes with skills containing Python OR AWS, AND a PhD in Statistics",
                ResumeFilter::new()
                    .with_any_skill(["Python", "AWS"])
                    .with_education("PhD", "Statistics"),
            ),
        ]
    }
}
