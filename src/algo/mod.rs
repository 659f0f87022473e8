//! Graph algorithms module
//!
//! Algorithms are implemented in the `socialgraph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::{GraphStore, SocialGraph, UserKey};
use socialgraph_algorithms::{GraphView, NodeId};

// Re-export algorithms
pub use socialgraph_algorithms::{friends_of_friends, in_degrees, influential_followers, InfluenceScore};

/// Build a GraphView from the store for algorithm execution
pub fn build_view(store: &GraphStore) -> GraphView {
    let nodes: Vec<NodeId> = store.all_users().iter().map(|u| u.key.as_u64()).collect();
    let edges = store
        .follows()
        .map(|f| (f.follower.as_u64(), f.followee.as_u64()));
    GraphView::from_edges(&nodes, edges)
}

/// Build a GraphView straight from a generated snapshot
pub fn build_view_from_graph(graph: &SocialGraph) -> GraphView {
    let nodes: Vec<NodeId> = graph.users.iter().map(|u| u.key.as_u64()).collect();
    let edges = graph
        .follows
        .iter()
        .map(|f| (f.follower.as_u64(), f.followee.as_u64()));
    GraphView::from_edges(&nodes, edges)
}

/// Dense view index for a user key
pub fn view_index(view: &GraphView, key: UserKey) -> Option<usize> {
    view.index_of(key.as_u64())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Follow, User};

    #[test]
    fn test_build_view_matches_store() {
        let mut store = GraphStore::new();
        let users: Vec<User> = (1..=3).map(|i| User::new(UserKey::new(i), format!("U{}", i))).collect();
        store.insert_users(&users).unwrap();
        store
            .insert_follows(&[
                Follow::new(UserKey::new(1), UserKey::new(2)).unwrap(),
                Follow::new(UserKey::new(2), UserKey::new(3)).unwrap(),
            ])
            .unwrap();

        let view = build_view(&store);
        assert_eq!(view.node_count, 3);
        assert_eq!(view.edge_count(), 2);

        let one = view_index(&view, UserKey::new(1)).unwrap();
        let fof = friends_of_friends(&view, one);
        assert_eq!(fof, vec![3]);
    }

    #[test]
    fn test_view_from_graph() {
        let graph = SocialGraph {
            users: vec![User::new(UserKey::new(5), "A"), User::new(UserKey::new(9), "B")],
            follows: vec![Follow::new(UserKey::new(9), UserKey::new(5)).unwrap()],
        };
        let view = build_view_from_graph(&graph);
        let five = view_index(&view, UserKey::new(5)).unwrap();
        assert_eq!(view.in_degree(five), 1);
    }
}
