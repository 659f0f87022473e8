//! Follow-graph data model
//!
//! - Users with resumes (skills, positions, education)
//! - Directed follow edges without self-loops or duplicates
//! - In-memory storage with adjacency lists and a skill index

pub mod follow;
pub mod store;
pub mod types;
pub mod user;

// Re-export main types
pub use follow::Follow;
pub use store::{GraphError, GraphResult, GraphStats, GraphStore};
pub use types::{Skill, UserKey};
pub use user::{Education, Position, User};

/// A complete generated snapshot: every user and every follow edge
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SocialGraph {
    pub users: Vec<User>,
    pub follows: Vec<Follow>,
}

impl SocialGraph {
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn follow_count(&self) -> usize {
        self.follows.len()
    }

    /// Number of edges leaving each user, keyed by user
    pub fn out_degrees(&self) -> std::collections::BTreeMap<UserKey, usize> {
        let mut degrees: std::collections::BTreeMap<UserKey, usize> =
            self.users.iter().map(|u| (u.key, 0)).collect();
        for edge in &self.follows {
            *degrees.entry(edge.follower).or_insert(0) += 1;
        }
        degrees
    }
}
