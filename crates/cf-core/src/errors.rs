//! Cross-cutting error types for ComplyFlow.
//!
//! Domain-specific errors (e.g., `AnalysisError`, `StoreError`) are defined in
//! their respective crates. The CLI converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised while validating canonical records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed structural validation (empty ids, duplicates).
    #[error("Validation error: {0}")]
    Validation(String),
}
