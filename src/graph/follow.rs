//! Directed follow edges

use super::store::{GraphError, GraphResult};
use super::types::UserKey;
use serde::{Deserialize, Serialize};

/// `follower` observes `followee`'s activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Follow {
    pub follower: UserKey,
    pub followee: UserKey,
}

impl Follow {
    /// Create a follow edge, rejecting self-loops
    pub fn new(follower: UserKey, followee: UserKey) -> GraphResult<Self> {
        if follower == followee {
            return Err(GraphError::SelfLoop(follower));
        }
        Ok(Follow { follower, followee })
    }

    pub fn as_pair(&self) -> (UserKey, UserKey) {
        (self.follower, self.followee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_rejects_self_loop() {
        let key = UserKey::new(3);
        assert_eq!(Follow::new(key, key), Err(GraphError::SelfLoop(key)));
    }

    #[test]
    fn test_follow_pair() {
        let edge = Follow::new(UserKey::new(1), UserKey::new(2)).unwrap();
        assert_eq!(edge.as_pair(), (UserKey::new(1), UserKey::new(2)));
    }
}
