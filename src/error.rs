//! Error types for psl-gen.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for psl-gen operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input file missing or unreadable
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be written
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Template has no substitution marker
    #[error("template does not contain the substitution marker {0:?}")]
    MissingMarker(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Label literal encoding error
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for psl-gen operations.
pub type Result<T> = std::result::Result<T, Error>;
