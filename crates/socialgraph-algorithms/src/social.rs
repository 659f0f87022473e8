//! Follow-graph analytics
//!
//! Two-hop follow suggestions and influential-follower ranking.

use super::common::{GraphView, NodeId};
use rayon::prelude::*;
use rustc_hash::FxHashSet;

/// A user together with the number of its influential followers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfluenceScore {
    pub node: NodeId,
    pub influential_followers: usize,
}

/// In-degree of every node, indexed by dense index
pub fn in_degrees(view: &GraphView) -> Vec<usize> {
    (0..view.node_count).map(|idx| view.in_degree(idx)).collect()
}

/// Users reachable over exactly two follow edges from `source`.
///
/// Excludes `source` itself and everyone `source` already follows. The result
/// is deduplicated and sorted by node id.
pub fn friends_of_friends(view: &GraphView, source: usize) -> Vec<NodeId> {
    let direct = view.successors(source);
    let mut seen: FxHashSet<usize> = FxHashSet::default();

    for &middle in direct {
        for &candidate in view.successors(middle) {
            if candidate == source {
                continue;
            }
            // rows are sorted, so membership is a binary search
            if direct.binary_search(&candidate).is_ok() {
                continue;
            }
            seen.insert(candidate);
        }
    }

    let mut result: Vec<NodeId> = seen.into_iter().map(|idx| view.index_to_node[idx]).collect();
    result.sort_unstable();
    result
}

/// Rank users by how many of their followers are themselves followed by at
/// least `min_followers` users.
///
/// The same threshold is the report cutoff: a user is kept only when its
/// influential-follower count is also `>= min_followers`. Users with no
/// qualifying follower are never reported. Ordered by count descending,
/// ties by ascending node id.
pub fn influential_followers(view: &GraphView, min_followers: usize) -> Vec<InfluenceScore> {
    let degrees = in_degrees(view);

    let mut scores: Vec<InfluenceScore> = (0..view.node_count)
        .into_par_iter()
        .filter_map(|idx| {
            let count = view
                .predecessors(idx)
                .iter()
                .filter(|&&follower| degrees[follower] >= min_followers)
                .count();
            if count == 0 || count < min_followers {
                return None;
            }
            Some(InfluenceScore {
                node: view.index_to_node[idx],
                influential_followers: count,
            })
        })
        .collect();

    scores.sort_unstable_by(|a, b| {
        b.influential_followers
            .cmp(&a.influential_followers)
            .then_with(|| a.node.cmp(&b.node))
    });
    scores
}
