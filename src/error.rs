//! Error types shared by the generator, loaders and analytics

use crate::graph::{GraphError, UserKey};
use crate::query::QueryKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while generating a graph
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Bad generation bounds; the caller must fix its configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The attribute source could not supply enough distinct names
    #[error("Generation exhausted: {produced} of {requested} distinct names after {attempts} draws")]
    GenerationExhausted {
        requested: usize,
        produced: usize,
        attempts: usize,
    },
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// A backend refused or failed to store a batch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// The batch violates a graph invariant and was not applied
    #[error("Batch rejected: {0}")]
    Rejected(#[from] GraphError),

    /// The underlying store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type LoaderResult<T> = std::result::Result<T, LoaderError>;

/// An analytic query could not be answered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Graph not loaded: no complete snapshot is available")]
    GraphNotLoaded,

    #[error("Query {0} is not supported by this backend")]
    Unsupported(QueryKind),

    #[error("User {0} not found")]
    UnknownUser(UserKey),

    #[error("Backend answered a {expected} query with {actual} output")]
    UnexpectedOutput {
        expected: QueryKind,
        actual: QueryKind,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Coarse error classification used by callers deciding how to react
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidParameter,
    GenerationExhausted,
    LoaderFailure,
    QueryFailure,
    Config,
}

/// Umbrella error for operations spanning several stages
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Loader(#[from] LoaderError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Generation(GenerationError::InvalidParameter(_)) => ErrorKind::InvalidParameter,
            Error::Generation(GenerationError::GenerationExhausted { .. }) => {
                ErrorKind::GenerationExhausted
            }
            Error::Loader(_) => ErrorKind::LoaderFailure,
            Error::Query(_) => ErrorKind::QueryFailure,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err: Error = GenerationError::InvalidParameter("population_size".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);

        let err: Error = GenerationError::GenerationExhausted { requested: 10, produced: 3, attempts: 320 }.into();
        assert_eq!(err.kind(), ErrorKind::GenerationExhausted);

        let err: Error = LoaderError::Storage("disk full".into()).into();
        assert_eq!(err.kind(), ErrorKind::LoaderFailure);

        let err: Error = QueryError::GraphNotLoaded.into();
        assert_eq!(err.kind(), ErrorKind::QueryFailure);
    }

    #[test]
    fn test_layer_result_aliases() {
        fn generate(ok: bool) -> GenerationResult<usize> {
            if ok {
                Ok(3)
            } else {
                Err(GenerationError::InvalidParameter("max_out_degree".into()))
            }
        }
        fn load() -> LoaderResult<usize> {
            Err(LoaderError::Storage("disk full".into()))
        }
        fn query() -> QueryResult<()> {
            Err(QueryError::GraphNotLoaded)
        }
        fn pipeline() -> Result<usize> {
            let users = generate(true)?;
            load()?;
            Ok(users)
        }

        assert_eq!(generate(true), Ok(3));
        assert!(generate(false).is_err());
        assert_eq!(pipeline().unwrap_err().kind(), ErrorKind::LoaderFailure);
        let err: Error = query().unwrap_err().into();
        assert_eq!(err.kind(), ErrorKind::QueryFailure);
    }

    #[test]
    fn test_rejected_batch_message() {
        let err = LoaderError::from(GraphError::SelfLoop(UserKey::new(4)));
        assert_eq!(err.to_string(), "Batch rejected: Invalid follow: user:4 cannot follow itself");
    }

    #[test]
    fn test_exhausted_message() {
        let err = GenerationError::GenerationExhausted { requested: 10, produced: 3, attempts: 320 };
        assert_eq!(err.to_string(), "Generation exhausted: 3 of 10 distinct names after 320 draws");
    }
}
