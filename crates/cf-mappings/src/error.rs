//! Mapping registry error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    /// The mapping file could not be read.
    #[error("Failed to read mappings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping file is not a JSON array of mappings.
    #[error("Failed to parse mappings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mapping is missing a required field.
    #[error("Invalid mapping {id}: {reason}")]
    Invalid { id: String, reason: String },
}
