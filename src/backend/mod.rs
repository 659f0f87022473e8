//! Storage backends
//!
//! The generator and the analytics engine never talk to a store directly.
//! They go through two capabilities:
//!
//! - [`BulkLoader`]: purge, batched vertex/edge insert, seal
//! - [`QueryBackend`]: answer [`AnalyticQuery`] values it declares support for
//!
//! Implemented by:
//! - [`InMemoryBackend`]: adjacency lists plus a CSR view for traversals
//! - `RocksBackend` (feature `rocksdb`): key-value adapter answering queries by scans

pub mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocks;

pub use memory::InMemoryBackend;
#[cfg(feature = "rocksdb")]
pub use rocks::RocksBackend;

use crate::error::{LoaderResult, QueryResult};
use crate::graph::{Follow, GraphStats, User};
use crate::query::{AnalyticQuery, QueryKind, QueryOutput};
use async_trait::async_trait;

/// Batched write side of a backend
#[async_trait]
pub trait BulkLoader: Send + Sync {
    /// Remove every previously loaded user and follow edge
    async fn purge_all(&self) -> LoaderResult<GraphStats>;

    /// Insert a batch of users, returning how many were inserted.
    ///
    /// A batch that violates a graph invariant is rejected as a whole.
    async fn load_vertices(&self, batch: &[User]) -> LoaderResult<usize>;

    /// Insert a batch of follow edges; both endpoints must already be loaded
    async fn load_edges(&self, batch: &[Follow]) -> LoaderResult<usize>;

    /// Declare the loaded contents a complete snapshot.
    ///
    /// Queries fail with `GraphNotLoaded` until this is called; any further
    /// load or purge invalidates the snapshot again.
    async fn seal(&self) -> LoaderResult<()>;
}

/// Read side of a backend
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &str;

    /// Whether [`run_query`](Self::run_query) can answer this kind of query
    fn supports(&self, kind: QueryKind) -> bool;

    /// Answer a query against the sealed snapshot
    async fn run_query(&self, query: &AnalyticQuery) -> QueryResult<QueryOutput>;
}

/// A backend that can be both loaded and queried
pub trait GraphBackend: BulkLoader + QueryBackend {}

impl<T: BulkLoader + QueryBackend> GraphBackend for T {}
