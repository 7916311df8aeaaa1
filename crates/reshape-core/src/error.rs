use reshape_ast::{RefactorError, TreeShapeError};
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for reshape operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read input at {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input at {path}: {source}")]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed syntax tree in {path}: {source}")]
    InputShape {
        path: PathBuf,
        #[source]
        source: TreeShapeError,
    },

    #[error(transparent)]
    Refactor(#[from] RefactorError),

    #[error("{0}")]
    Other(String),
}

impl Error {
    #[must_use]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
