//! Backend-neutral analytic queries
//!
//! Every analysis the engine can ask for is an [`AnalyticQuery`] variant and
//! every answer a [`QueryOutput`] variant with fixed fields. Backends
//! translate these into whatever their store speaks.

pub mod filter;

pub use filter::{EducationMatch, ResumeFilter};

use crate::graph::{GraphStats, Skill, User, UserKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Discriminant of an analytic query, used for capability checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    SkillCounts,
    FriendsOfFriends,
    InfluentialFollowers,
    FollowersOf,
    Resume,
    CountResumes,
    Stats,
}

impl QueryKind {
    pub const ALL: [QueryKind; 7] = [
        QueryKind::SkillCounts,
        QueryKind::FriendsOfFriends,
        QueryKind::InfluentialFollowers,
        QueryKind::FollowersOf,
        QueryKind::Resume,
        QueryKind::CountResumes,
        QueryKind::Stats,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::SkillCounts => "skill_counts",
            QueryKind::FriendsOfFriends => "friends_of_friends",
            QueryKind::InfluentialFollowers => "influential_followers",
            QueryKind::FollowersOf => "followers_of",
            QueryKind::Resume => "resume",
            QueryKind::CountResumes => "count_resumes",
            QueryKind::Stats => "stats",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An analytic query against a loaded snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum AnalyticQuery {
    /// Distinct holders per skill
    SkillCounts,
    /// Two-hop follow suggestions for `user`
    FriendsOfFriends { user: UserKey },
    /// Users with at least `min_followers` followers that are themselves
    /// followed by at least `min_followers` users
    InfluentialFollowers { min_followers: usize },
    /// Direct followers of `user`
    FollowersOf { user: UserKey },
    /// Full resume of `user`
    Resume { user: UserKey },
    /// Number of resumes matching a filter
    CountResumes { filter: ResumeFilter },
    /// Vertex and edge counts
    Stats,
}

impl AnalyticQuery {
    pub fn kind(&self) -> QueryKind {
        match self {
            AnalyticQuery::SkillCounts => QueryKind::SkillCounts,
            AnalyticQuery::FriendsOfFriends { .. } => QueryKind::FriendsOfFriends,
            AnalyticQuery::InfluentialFollowers { .. } => QueryKind::InfluentialFollowers,
            AnalyticQuery::FollowersOf { .. } => QueryKind::FollowersOf,
            AnalyticQuery::Resume { .. } => QueryKind::Resume,
            AnalyticQuery::CountResumes { .. } => QueryKind::CountResumes,
            AnalyticQuery::Stats => QueryKind::Stats,
        }
    }
}

/// One row of the influential-followers report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfluenceRow {
    pub user: UserKey,
    pub influential_followers: usize,
}

/// Result of an analytic query; one variant per [`QueryKind`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum QueryOutput {
    SkillCounts(BTreeMap<Skill, u64>),
    FriendsOfFriends(BTreeSet<UserKey>),
    /// Ordered by count descending, then key ascending
    InfluentialFollowers(Vec<InfluenceRow>),
    /// Ascending by key
    FollowersOf(Vec<UserKey>),
    Resume(Box<User>),
    CountResumes(u64),
    Stats(GraphStats),
}

impl QueryOutput {
    pub fn kind(&self) -> QueryKind {
        match self {
            QueryOutput::SkillCounts(_) => QueryKind::SkillCounts,
            QueryOutput::FriendsOfFriends(_) => QueryKind::FriendsOfFriends,
            QueryOutput::InfluentialFollowers(_) => QueryKind::InfluentialFollowers,
            QueryOutput::FollowersOf(_) => QueryKind::FollowersOf,
            QueryOutput::Resume(_) => QueryKind::Resume,
            QueryOutput::CountResumes(_) => QueryKind::CountResumes,
            QueryOutput::Stats(_) => QueryKind::Stats,
        }
    }

    /// Number of result rows (scalar outputs count as one row)
    pub fn len(&self) -> usize {
        match self {
            QueryOutput::SkillCounts(rows) => rows.len(),
            QueryOutput::FriendsOfFriends(rows) => rows.len(),
            QueryOutput::InfluentialFollowers(rows) => rows.len(),
            QueryOutput::FollowersOf(rows) => rows.len(),
            QueryOutput::Resume(_) | QueryOutput::CountResumes(_) | QueryOutput::Stats(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_kinds() {
        assert_eq!(AnalyticQuery::SkillCounts.kind(), QueryKind::SkillCounts);
        assert_eq!(
            AnalyticQuery::FriendsOfFriends { user: UserKey::new(1) }.kind(),
            QueryKind::FriendsOfFriends
        );
        assert_eq!(
            AnalyticQuery::CountResumes { filter: ResumeFilter::default() }.kind(),
            QueryKind::CountResumes
        );
        assert_eq!(format!("{}", QueryKind::InfluentialFollowers), "influential_followers");
    }

    #[test]
    fn test_output_kind_and_len() {
        let output = QueryOutput::FriendsOfFriends(BTreeSet::new());
        assert_eq!(output.kind(), QueryKind::FriendsOfFriends);
        assert!(output.is_empty());

        let output = QueryOutput::CountResumes(0);
        assert_eq!(output.len(), 1);
    }

    #[test]
    fn test_query_serialization() {
        let query = AnalyticQuery::InfluentialFollowers { min_followers: 12 };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["query"], "influential_followers");
        assert_eq!(json["min_followers"], 12);
    }
}
