//! Analytics engine
//!
//! Issues [`AnalyticQuery`] values against an injected backend and unpacks
//! the typed answers. The engine never owns the backend's lifecycle; it only
//! holds a shared handle to it.

use crate::backend::QueryBackend;
use crate::error::{QueryError, QueryResult};
use crate::graph::{GraphStats, Skill, User, UserKey};
use crate::query::{AnalyticQuery, InfluenceRow, QueryKind, QueryOutput, ResumeFilter};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::debug;

/// Runs the analytic query set against one backend
pub struct AnalyticsEngine<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for AnalyticsEngine<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: QueryBackend + ?Sized> AnalyticsEngine<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Check the capability, then issue the query
    pub async fn execute(&self, query: &AnalyticQuery) -> QueryResult<QueryOutput> {
        let kind = query.kind();
        if !self.backend.supports(kind) {
            return Err(QueryError::Unsupported(kind));
        }

        let output = self.backend.run_query(query).await?;
        debug!(
            "{} answered {} with {} rows",
            self.backend.name(),
            kind,
            output.len()
        );
        Ok(output)
    }

    /// Distinct users per skill, ordered by skill name
    pub async fn skill_counts(&self) -> QueryResult<BTreeMap<Skill, u64>> {
        match self.execute(&AnalyticQuery::SkillCounts).await? {
            QueryOutput::SkillCounts(counts) => Ok(counts),
            other => Err(unexpected(QueryKind::SkillCounts, &other)),
        }
    }

    /// Users two follow hops away from `user` that it does not follow yet
    pub async fn friends_of_friends(&self, user: UserKey) -> QueryResult<BTreeSet<UserKey>> {
        match self.execute(&AnalyticQuery::FriendsOfFriends { user }).await? {
            QueryOutput::FriendsOfFriends(keys) => Ok(keys),
            other => Err(unexpected(QueryKind::FriendsOfFriends, &other)),
        }
    }

    /// Users ranked by how many of their followers are themselves followed
    /// by at least `min_followers` users
    pub async fn influential_followers(&self, min_followers: usize) -> QueryResult<Vec<InfluenceRow>> {
        match self
            .execute(&AnalyticQuery::InfluentialFollowers { min_followers })
            .await?
        {
            QueryOutput::InfluentialFollowers(rows) => Ok(rows),
            other => Err(unexpected(QueryKind::InfluentialFollowers, &other)),
        }
    }

    pub async fn followers_of(&self, user: UserKey) -> QueryResult<Vec<UserKey>> {
        match self.execute(&AnalyticQuery::FollowersOf { user }).await? {
            QueryOutput::FollowersOf(keys) => Ok(keys),
            other => Err(unexpected(QueryKind::FollowersOf, &other)),
        }
    }

    /// The full resume of one user
    pub async fn resume(&self, user: UserKey) -> QueryResult<User> {
        match self.execute(&AnalyticQuery::Resume { user }).await? {
            QueryOutput::Resume(resume) => Ok(*resume),
            other => Err(unexpected(QueryKind::Resume, &other)),
        }
    }

    pub async fn count_resumes(&self, filter: &ResumeFilter) -> QueryResult<u64> {
        let query = AnalyticQuery::CountResumes {
            filter: filter.clone(),
        };
        match self.execute(&query).await? {
            QueryOutput::CountResumes(count) => Ok(count),
            other => Err(unexpected(QueryKind::CountResumes, &other)),
        }
    }

    /// Number of loaded users
    pub async fn total_users(&self) -> QueryResult<u64> {
        self.count_resumes(&ResumeFilter::default()).await
    }

    pub async fn stats(&self) -> QueryResult<GraphStats> {
        match self.execute(&AnalyticQuery::Stats).await? {
            QueryOutput::Stats(stats) => Ok(stats),
            other => Err(unexpected(QueryKind::Stats, &other)),
        }
    }
}

fn unexpected(expected: QueryKind, output: &QueryOutput) -> QueryError {
    QueryError::UnexpectedOutput {
        expected,
        actual: output.kind(),
    }
}
