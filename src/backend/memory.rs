//! In-process backend over [`GraphStore`]

use super::{BulkLoader, QueryBackend};
use crate::algo::{self, build_view, view_index};
use crate::error::{LoaderResult, QueryError, QueryResult};
use crate::graph::{Follow, GraphStats, GraphStore, User, UserKey};
use crate::query::{AnalyticQuery, InfluenceRow, QueryKind, QueryOutput};
use async_trait::async_trait;
use socialgraph_algorithms::GraphView;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Store plus the traversal view built when the snapshot is sealed
#[derive(Debug, Default)]
struct MemoryState {
    store: GraphStore,
    /// Present exactly while the store is sealed
    view: Option<GraphView>,
}

/// In-process backend wrapping a [`GraphStore`] directly.
///
/// Loaders take the write lock once per batch; queries share the read lock
/// and can run concurrently.
pub struct InMemoryBackend {
    state: Arc<RwLock<MemoryState>>,
    supported: HashSet<QueryKind>,
}

impl InMemoryBackend {
    /// Backend supporting every query kind
    pub fn new() -> Self {
        Self::with_supported(QueryKind::ALL)
    }

    /// Backend that only answers the given query kinds
    pub fn with_supported(kinds: impl IntoIterator<Item = QueryKind>) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            supported: kinds.into_iter().collect(),
        }
    }

    /// Current record counts, sealed or not
    pub async fn stats(&self) -> GraphStats {
        self.state.read().await.store.stats()
    }

    pub async fn is_sealed(&self) -> bool {
        self.state.read().await.store.is_sealed()
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BulkLoader for InMemoryBackend {
    async fn purge_all(&self) -> LoaderResult<GraphStats> {
        let mut state = self.state.write().await;
        state.view = None;
        let removed = state.store.clear();
        debug!("Purged {} users and {} follows", removed.users, removed.follows);
        Ok(removed)
    }

    async fn load_vertices(&self, batch: &[User]) -> LoaderResult<usize> {
        let mut state = self.state.write().await;
        state.view = None;
        Ok(state.store.insert_users(batch)?)
    }

    async fn load_edges(&self, batch: &[Follow]) -> LoaderResult<usize> {
        let mut state = self.state.write().await;
        state.view = None;
        Ok(state.store.insert_follows(batch)?)
    }

    async fn seal(&self) -> LoaderResult<()> {
        let mut state = self.state.write().await;
        let view = build_view(&state.store);
        debug!(
            "Sealed snapshot: {} users, {} follows",
            view.node_count,
            view.edge_count()
        );
        state.view = Some(view);
        state.store.seal();
        Ok(())
    }
}

#[async_trait]
impl QueryBackend for InMemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn supports(&self, kind: QueryKind) -> bool {
        self.supported.contains(&kind)
    }

    async fn run_query(&self, query: &AnalyticQuery) -> QueryResult<QueryOutput> {
        if !self.supports(query.kind()) {
            return Err(QueryError::Unsupported(query.kind()));
        }

        let state = self.state.read().await;
        let view = match (&state.view, state.store.is_sealed()) {
            (Some(view), true) => view,
            _ => return Err(QueryError::GraphNotLoaded),
        };
        let store = &state.store;

        let output = match query {
            AnalyticQuery::SkillCounts => QueryOutput::SkillCounts(store.skill_counts()),

            AnalyticQuery::FriendsOfFriends { user } => {
                let idx = view_index(view, *user).ok_or(QueryError::UnknownUser(*user))?;
                let suggestions: BTreeSet<UserKey> = algo::friends_of_friends(view, idx)
                    .into_iter()
                    .map(UserKey::new)
                    .collect();
                QueryOutput::FriendsOfFriends(suggestions)
            }

            AnalyticQuery::InfluentialFollowers { min_followers } => {
                let rows = algo::influential_followers(view, *min_followers)
                    .into_iter()
                    .map(|score| InfluenceRow {
                        user: UserKey::new(score.node),
                        influential_followers: score.influential_followers,
                    })
                    .collect();
                QueryOutput::InfluentialFollowers(rows)
            }

            AnalyticQuery::FollowersOf { user } => {
                let mut followers = store
                    .followers(*user)
                    .map_err(|_| QueryError::UnknownUser(*user))?
                    .to_vec();
                followers.sort_unstable();
                QueryOutput::FollowersOf(followers)
            }

            AnalyticQuery::Resume { user } => {
                let resume = store.get_user(*user).ok_or(QueryError::UnknownUser(*user))?;
                QueryOutput::Resume(Box::new(resume.clone()))
            }

            AnalyticQuery::CountResumes { filter } => {
                let count = store.all_users().iter().filter(|u| filter.matches(u)).count();
                QueryOutput::CountResumes(count as u64)
            }

            AnalyticQuery::Stats => QueryOutput::Stats(store.stats()),
        };

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoaderError;
    use crate::graph::GraphError;
    use crate::query::ResumeFilter;

    fn key(id: u64) -> UserKey {
        UserKey::new(id)
    }

    fn follow(a: u64, b: u64) -> Follow {
        Follow::new(key(a), key(b)).unwrap()
    }

    /// A=1, B=2, C=3, D=4, E=5 with A->B, A->C, B->D, C->D, C->E
    async fn diamond() -> InMemoryBackend {
        let backend = InMemoryBackend::new();
        let users: Vec<User> = (1..=5)
            .map(|i| User::new(key(i), format!("U{}", i)).with_skills(["Python"]))
            .collect();
        backend.load_vertices(&users).await.unwrap();
        backend
            .load_edges(&[follow(1, 2), follow(1, 3), follow(2, 4), follow(3, 4), follow(3, 5)])
            .await
            .unwrap();
        backend.seal().await.unwrap();
        backend
    }

    #[tokio::test]
    async fn test_friends_of_friends() {
        let backend = diamond().await;
        let output = backend
            .run_query(&AnalyticQuery::FriendsOfFriends { user: key(1) })
            .await
            .unwrap();
        assert_eq!(output, QueryOutput::FriendsOfFriends([key(4), key(5)].into_iter().collect()));
    }

    #[tokio::test]
    async fn test_influential_followers() {
        let backend = diamond().await;
        let output = backend
            .run_query(&AnalyticQuery::InfluentialFollowers { min_followers: 1 })
            .await
            .unwrap();
        match output {
            QueryOutput::InfluentialFollowers(rows) => {
                assert_eq!(rows[0], InfluenceRow { user: key(4), influential_followers: 2 });
                assert_eq!(rows[1], InfluenceRow { user: key(5), influential_followers: 1 });
                assert_eq!(rows.len(), 2);
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_loaded_until_sealed() {
        let backend = InMemoryBackend::new();
        let err = backend.run_query(&AnalyticQuery::Stats).await.unwrap_err();
        assert_eq!(err, QueryError::GraphNotLoaded);

        backend.load_vertices(&[User::new(key(1), "A")]).await.unwrap();
        assert_eq!(backend.run_query(&AnalyticQuery::Stats).await.unwrap_err(), QueryError::GraphNotLoaded);

        backend.seal().await.unwrap();
        assert!(backend.run_query(&AnalyticQuery::Stats).await.is_ok());

        // loading more invalidates the snapshot
        backend.load_vertices(&[User::new(key(2), "B")]).await.unwrap();
        assert_eq!(backend.run_query(&AnalyticQuery::Stats).await.unwrap_err(), QueryError::GraphNotLoaded);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let backend = diamond().await;
        for query in [
            AnalyticQuery::FriendsOfFriends { user: key(99) },
            AnalyticQuery::FollowersOf { user: key(99) },
            AnalyticQuery::Resume { user: key(99) },
        ] {
            assert_eq!(backend.run_query(&query).await.unwrap_err(), QueryError::UnknownUser(key(99)));
        }
    }

    #[tokio::test]
    async fn test_unsupported_kind() {
        let backend = InMemoryBackend::with_supported([QueryKind::SkillCounts]);
        assert!(backend.supports(QueryKind::SkillCounts));
        assert!(!backend.supports(QueryKind::FriendsOfFriends));

        let err = backend
            .run_query(&AnalyticQuery::FriendsOfFriends { user: key(1) })
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::Unsupported(QueryKind::FriendsOfFriends));
    }

    #[tokio::test]
    async fn test_rejected_batch_not_applied() {
        let backend = InMemoryBackend::new();
        backend.load_vertices(&[User::new(key(1), "A"), User::new(key(2), "B")]).await.unwrap();

        let err = backend
            .load_edges(&[follow(1, 2), Follow { follower: key(1), followee: key(7) }])
            .await
            .unwrap_err();
        assert_eq!(err, LoaderError::Rejected(GraphError::UnknownEndpoint(key(7))));
        assert_eq!(backend.stats().await.follows, 0);
    }

    #[tokio::test]
    async fn test_purge_and_other_queries() {
        let backend = diamond().await;

        let followers = backend.run_query(&AnalyticQuery::FollowersOf { user: key(4) }).await.unwrap();
        assert_eq!(followers, QueryOutput::FollowersOf(vec![key(2), key(3)]));

        let count = backend
            .run_query(&AnalyticQuery::CountResumes { filter: ResumeFilter::new().with_skill("Python") })
            .await
            .unwrap();
        assert_eq!(count, QueryOutput::CountResumes(5));

        let removed = backend.purge_all().await.unwrap();
        assert_eq!(removed, GraphStats { users: 5, follows: 5 });
        assert!(!backend.is_sealed().await);
        assert_eq!(backend.stats().await, GraphStats::default());
    }
}
