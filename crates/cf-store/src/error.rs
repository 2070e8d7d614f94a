//! Store error types for cf-store.

use std::path::PathBuf;

use cf_core::errors::CoreError;
use thiserror::Error;

/// Errors from loading inputs or writing to a collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file or directory could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// JSON was well-formed but could not be mapped to a canonical record.
    #[error("Unrecognized {kind} record: {reason}")]
    Ingest { kind: &'static str, reason: String },

    /// A canonical record failed structural validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The collaborator refused or failed the request.
    #[error("Service rejected {id}: {reason}")]
    Rejected { id: String, reason: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn ingest(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Ingest {
            kind,
            reason: reason.into(),
        }
    }
}
