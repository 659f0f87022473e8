//! Core type definitions for the follow graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a user
///
/// Keys are allocated by the generator and never derived from display names,
/// so two users sharing a name remain distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct UserKey(pub u64);

impl UserKey {
    pub fn new(id: u64) -> Self {
        UserKey(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

impl From<u64> for UserKey {
    fn from(id: u64) -> Self {
        UserKey(id)
    }
}

/// Skill tag (e.g., "Python", "Kubernetes")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Skill(String);

impl Skill {
    pub fn new(name: impl Into<String>) -> Self {
        Skill(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Skill {
    fn from(s: &str) -> Self {
        Skill(s.to_string())
    }
}

impl From<String> for Skill {
    fn from(s: String) -> Self {
        Skill(s)
    }
}
