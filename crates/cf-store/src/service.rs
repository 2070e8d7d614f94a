//! Collaborator seams for persisting remediation artifacts.
//!
//! The analysis core never writes anything itself. Callers pass in whatever
//! implementation fits their runtime: the JSONL sinks in [`crate::sinks`], a
//! remote API client, or a test double.

use std::future::Future;

use cf_core::entities::{ControlStub, TaskSpec};

use crate::error::StoreError;

/// Creates one task per call.
pub trait TaskCreationService {
    /// Create a task from `spec` and return its id.
    ///
    /// Implementations should be idempotent by `spec.gap_id` so that a
    /// retried spec does not produce a second task.
    fn create_task(&self, spec: &TaskSpec) -> impl Future<Output = Result<String, StoreError>> + Send;
}

/// Persists control stubs in a single batch write.
pub trait ControlPersistenceService {
    /// Persist `controls` and return how many were newly written.
    fn persist_controls(
        &self,
        controls: &[ControlStub],
    ) -> impl Future<Output = Result<usize, StoreError>> + Send;
}
