//! Batch persistence with partial-failure reporting.

use cf_core::entities::{ControlStub, TaskSpec};
use cf_core::responses::{BatchFailure, BatchOutcome, ControlPersistResponse, CreatedTask};

use crate::error::StoreError;
use crate::service::{ControlPersistenceService, TaskCreationService};

/// Create one task per spec, sequentially.
///
/// Every item is attempted regardless of earlier failures. The outcome lists
/// what was created and what failed, by position in `specs`; pass
/// [`BatchOutcome::failed_subset`] back in to retry only the failures.
pub async fn create_tasks<S>(service: &S, specs: &[TaskSpec]) -> BatchOutcome
where
    S: TaskCreationService + ?Sized,
{
    let mut outcome = BatchOutcome::default();

    for (index, spec) in specs.iter().enumerate() {
        match service.create_task(spec).await {
            Ok(task_id) => outcome.created.push(CreatedTask {
                index,
                gap_id: spec.gap_id.clone(),
                task_id,
            }),
            Err(error) => {
                tracing::warn!(index, gap_id = %spec.gap_id, %error, "task creation failed");
                outcome.failures.push(BatchFailure {
                    index,
                    gap_id: spec.gap_id.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    outcome.succeeded_count = outcome.created.len();
    tracing::info!(
        submitted = specs.len(),
        succeeded = outcome.succeeded_count,
        failed = outcome.failures.len(),
        "task batch finished"
    );
    outcome
}

/// Persist all controls in a single write.
///
/// # Errors
///
/// Returns the service's error unchanged; a control batch is all or nothing.
pub async fn persist_controls<S>(
    service: &S,
    controls: &[ControlStub],
) -> Result<ControlPersistResponse, StoreError>
where
    S: ControlPersistenceService + ?Sized,
{
    let persisted = service.persist_controls(controls).await?;
    tracing::info!(submitted = controls.len(), persisted, "control batch finished");
    Ok(ControlPersistResponse {
        persisted,
        control_ids: controls
            .iter()
            .map(|control| control.control_id.clone())
            .collect(),
    })
}
