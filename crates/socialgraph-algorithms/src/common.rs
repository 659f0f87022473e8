//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the follow-graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Dense indices are assigned in ascending `NodeId` order, so comparing two
/// indices gives the same answer as comparing the ids they stand for.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices, sorted within each row
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices, sorted within each row
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Build a view from a node set and directed `(source, target)` pairs.
    ///
    /// Edges whose endpoints are not in `nodes` are skipped; callers that need
    /// strictness validate before building the view.
    pub fn from_edges<I>(nodes: &[NodeId], edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut index_to_node = nodes.to_vec();
        index_to_node.sort_unstable();
        index_to_node.dedup();

        let node_count = index_to_node.len();
        let node_to_index: HashMap<NodeId, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for (source, target) in edges {
            if let (Some(&u), Some(&v)) = (node_to_index.get(&source), node_to_index.get(&target)) {
                outgoing[u].push(v);
                incoming[v].push(u);
            }
        }

        for row in outgoing.iter_mut().chain(incoming.iter_mut()) {
            row.sort_unstable();
        }

        Self::from_adjacency_list(node_count, index_to_node, node_to_index, outgoing, incoming)
    }

    /// Flatten adjacency lists into CSR form
    pub fn from_adjacency_list(
        node_count: usize,
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }

    /// Dense index of a node id, if the node is part of the view
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        self.node_to_index.get(&id).copied()
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (followees) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (followers) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Total number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }
}
