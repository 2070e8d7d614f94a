//! Analysis error types.

use thiserror::Error;

/// Errors from flow aggregation and plan synthesis.
///
/// The classification, estimation, taxonomy, and extraction functions are
/// total and never return these.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested framework has no definition. A zero-gap flow would read
    /// as "fully compliant", so this is never degraded to an empty result.
    #[error("Framework not found: {framework_id}")]
    FrameworkNotFound { framework_id: String },

    /// A flow was paired with a different framework than the one it was built from.
    #[error("Flow was built against framework {flow_framework_id}, not {framework_id}")]
    FrameworkMismatch {
        flow_framework_id: String,
        framework_id: String,
    },

    /// A gap references a section, category, or question the framework lacks.
    #[error("Gap {gap_id} does not resolve to a question in framework {framework_id}")]
    GapNotInFramework {
        gap_id: String,
        framework_id: String,
    },
}
