//! In-memory follow-graph storage
//!
//! Backs the in-memory backend. Batches are validated in full before any
//! record is applied, so a rejected batch leaves the store untouched.

use super::follow::Follow;
use super::types::{Skill, UserKey};
use super::user::User;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors that can occur while loading records into a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("User {0} already exists")]
    DuplicateUser(UserKey),

    #[error("User {0} not found")]
    UserNotFound(UserKey),

    #[error("Invalid follow: {0} cannot follow itself")]
    SelfLoop(UserKey),

    #[error("Invalid follow: endpoint {0} does not exist")]
    UnknownEndpoint(UserKey),

    #[error("Follow {0} -> {1} already exists")]
    DuplicateFollow(UserKey, UserKey),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Record counts for a graph snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub users: usize,
    pub follows: usize,
}

/// In-memory graph storage
///
/// - users: arena in insertion order
/// - key_index: UserKey -> arena slot
/// - outgoing / incoming: adjacency lists aligned with the arena
/// - follow_set: ordered pairs, for duplicate detection
/// - skill_index: Skill -> holders
#[derive(Debug, Default)]
pub struct GraphStore {
    users: Vec<User>,
    key_index: HashMap<UserKey, usize>,
    outgoing: Vec<Vec<UserKey>>,
    incoming: Vec<Vec<UserKey>>,
    follow_set: FxHashSet<(UserKey, UserKey)>,
    skill_index: BTreeMap<Skill, FxHashSet<UserKey>>,
    /// Set once a complete snapshot has been loaded
    sealed: bool,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a batch of users
    pub fn insert_users(&mut self, batch: &[User]) -> GraphResult<usize> {
        let mut batch_keys = FxHashSet::default();
        for user in batch {
            if self.key_index.contains_key(&user.key) || !batch_keys.insert(user.key) {
                return Err(GraphError::DuplicateUser(user.key));
            }
        }

        self.users.reserve(batch.len());
        for user in batch {
            let slot = self.users.len();
            self.key_index.insert(user.key, slot);
            for skill in &user.skills {
                self.skill_index
                    .entry(skill.clone())
                    .or_default()
                    .insert(user.key);
            }
            self.users.push(user.clone());
            self.outgoing.push(Vec::new());
            self.incoming.push(Vec::new());
        }

        self.sealed = false;
        Ok(batch.len())
    }

    /// Insert a batch of follow edges
    pub fn insert_follows(&mut self, batch: &[Follow]) -> GraphResult<usize> {
        let mut batch_pairs = FxHashSet::default();
        for edge in batch {
            if edge.follower == edge.followee {
                return Err(GraphError::SelfLoop(edge.follower));
            }
            for endpoint in [edge.follower, edge.followee] {
                if !self.key_index.contains_key(&endpoint) {
                    return Err(GraphError::UnknownEndpoint(endpoint));
                }
            }
            let pair = edge.as_pair();
            if self.follow_set.contains(&pair) || !batch_pairs.insert(pair) {
                return Err(GraphError::DuplicateFollow(edge.follower, edge.followee));
            }
        }

        for edge in batch {
            let source = self.key_index[&edge.follower];
            let target = self.key_index[&edge.followee];
            self.outgoing[source].push(edge.followee);
            self.incoming[target].push(edge.follower);
            self.follow_set.insert(edge.as_pair());
        }

        self.sealed = false;
        Ok(batch.len())
    }

    /// Mark the current contents as a complete snapshot
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Get a user by key
    pub fn get_user(&self, key: UserKey) -> Option<&User> {
        self.key_index.get(&key).map(|&slot| &self.users[slot])
    }

    pub fn has_user(&self, key: UserKey) -> bool {
        self.key_index.contains_key(&key)
    }

    /// All users in insertion order
    pub fn all_users(&self) -> &[User] {
        &self.users
    }

    /// Users followed by `key`
    pub fn followees(&self, key: UserKey) -> GraphResult<&[UserKey]> {
        let slot = self.key_index.get(&key).ok_or(GraphError::UserNotFound(key))?;
        Ok(&self.outgoing[*slot])
    }

    /// Users following `key`
    pub fn followers(&self, key: UserKey) -> GraphResult<&[UserKey]> {
        let slot = self.key_index.get(&key).ok_or(GraphError::UserNotFound(key))?;
        Ok(&self.incoming[*slot])
    }

    /// Check whether `follower -> followee` exists
    pub fn has_follow(&self, follower: UserKey, followee: UserKey) -> bool {
        self.follow_set.contains(&(follower, followee))
    }

    /// Every follow edge, grouped by follower
    pub fn follows(&self) -> impl Iterator<Item = Follow> + '_ {
        self.users.iter().zip(&self.outgoing).flat_map(|(user, targets)| {
            targets.iter().map(move |&followee| Follow {
                follower: user.key,
                followee,
            })
        })
    }

    /// Number of distinct holders per skill, ordered by skill name
    pub fn skill_counts(&self) -> BTreeMap<Skill, u64> {
        self.skill_index
            .iter()
            .filter(|(_, holders)| !holders.is_empty())
            .map(|(skill, holders)| (skill.clone(), holders.len() as u64))
            .collect()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn follow_count(&self) -> usize {
        self.follow_set.len()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            users: self.user_count(),
            follows: self.follow_count(),
        }
    }

    /// Clear all data from the graph, returning what was removed
    pub fn clear(&mut self) -> GraphStats {
        let removed = self.stats();
        self.users.clear();
        self.key_index.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.follow_set.clear();
        self.skill_index.clear();
        self.sealed = false;
        removed
    }
}
