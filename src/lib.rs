//! Socialgraph
//!
//! Synthetic resume and follow-graph datasets with one set of analytic
//! queries that runs unchanged against interchangeable storage backends.
//!
//! # Architecture
//!
//! Attribute source -> graph generator -> bulk loader -> backend -> analytics engine
//!
//! - [`attributes`]: opaque source of names, companies, titles, universities
//! - [`generator`]: users with resumes plus a random directed follow graph
//! - [`backend`]: `BulkLoader` / `QueryBackend` traits, in-memory and RocksDB adapters
//! - [`pipeline`]: purge, batched concurrent load, seal, purge-and-retry
//! - [`analytics`]: skill counts, friends-of-friends, influential followers, resume filters
//!
//! Graph traversals run over the CSR view in `socialgraph-algorithms`.
//!
//! ## Example Usage
//!
//! ```rust
//! use socialgraph::algo::{build_view_from_graph, friends_of_friends, view_index};
//! use socialgraph::generator::generate_graph;
//!
//! // 100 users, each following between 2 and 5 others
//! let graph = generate_graph(100, 2, 5).unwrap();
//! assert_eq!(graph.user_count(), 100);
//!
//! let view = build_view_from_graph(&graph);
//! let first = graph.users[0].key;
//! let suggestions = friends_of_friends(&view, view_index(&view, first).unwrap());
//! assert!(!suggestions.contains(&first.as_u64()));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod analytics;
pub mod attributes;
pub mod backend;
pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod pipeline;
pub mod query;

// Re-export main types for convenience
pub use graph::{
    Education, Follow, GraphError, GraphResult, GraphStats, GraphStore, Position, Skill,
    SocialGraph, User, UserKey,
};

pub use attributes::{AttributeKind, AttributeSource, CatalogSource, DEFAULT_SKILLS};

pub use generator::{generate_graph, GraphGenerator};

pub use backend::{BulkLoader, GraphBackend, InMemoryBackend, QueryBackend};
#[cfg(feature = "rocksdb")]
pub use backend::RocksBackend;

pub use analytics::AnalyticsEngine;

pub use query::{AnalyticQuery, EducationMatch, InfluenceRow, QueryKind, QueryOutput, ResumeFilter};

pub use config::{AnalyticsConfig, CountRange, GeneratorConfig, LoaderConfig, SocialConfig};

pub use error::{
    ConfigError, Error, ErrorKind, GenerationError, GenerationResult, LoaderError, LoaderResult,
    QueryError, QueryResult, Result,
};

pub use pipeline::{load_snapshot, regenerate};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
