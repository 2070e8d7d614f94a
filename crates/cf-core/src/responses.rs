//! Response envelopes returned by collaborators and by `cfl` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ControlMapping, ControlStub, TaskSpec};
use crate::enums::MappingStrength;

/// A task the creation service accepted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CreatedTask {
    /// Position of the spec in the submitted batch.
    pub index: usize,
    pub gap_id: String,
    pub task_id: String,
}

/// A task the creation service rejected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BatchFailure {
    /// Position of the spec in the submitted batch.
    pub index: usize,
    pub gap_id: String,
    pub reason: String,
}

/// Result of creating a batch of tasks one at a time.
///
/// A partial failure is not an error: completed items are kept and only the
/// failed subset needs to be retried.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded_count: usize,
    pub created: Vec<CreatedTask>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Whether every submitted item succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Batch positions of the failed items, in submission order.
    #[must_use]
    pub fn failed_indices(&self) -> Vec<usize> {
        self.failures.iter().map(|failure| failure.index).collect()
    }

    /// The items at failed positions, for a scoped retry.
    #[must_use]
    pub fn failed_subset<T: Clone>(&self, items: &[T]) -> Vec<T> {
        self.failures
            .iter()
            .filter_map(|failure| items.get(failure.index).cloned())
            .collect()
    }

    /// Fold the outcome of retrying `failed_subset` back into this outcome.
    ///
    /// `retry` indexes refer to positions in the failed subset; they are
    /// translated back to positions in the original batch.
    pub fn absorb_retry(&mut self, retry: Self) {
        let original = self.failed_indices();

        for mut created in retry.created {
            if let Some(&index) = original.get(created.index) {
                created.index = index;
                self.created.push(created);
            }
        }

        self.failures = retry
            .failures
            .into_iter()
            .filter_map(|mut failure| {
                original.get(failure.index).map(|&index| {
                    failure.index = index;
                    failure
                })
            })
            .collect();

        self.created.sort_by_key(|created| created.index);
        self.succeeded_count = self.created.len();
    }
}

/// Response from `cfl controls create`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ControlPersistResponse {
    pub persisted: usize,
    pub control_ids: Vec<String>,
}

/// Tasks and controls synthesized from one flow, in gap order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RemediationPlan {
    pub assessment_id: String,
    pub framework_id: String,
    pub tasks: Vec<TaskSpec>,
    pub controls: Vec<ControlStub>,
}

/// A control on the far side of a mapping.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Counterpart {
    pub framework_id: String,
    pub control_id: String,
    pub strength: MappingStrength,
    pub mapping_id: String,
}

/// Response from `cfl mappings`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MappingQueryResponse {
    pub control_id: String,
    pub mappings: Vec<ControlMapping>,
    pub counterparts: Vec<Counterpart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(index: usize) -> BatchFailure {
        BatchFailure {
            index,
            gap_id: format!("gap-{index}"),
            reason: "unavailable".to_string(),
        }
    }

    fn created(index: usize) -> CreatedTask {
        CreatedTask {
            index,
            gap_id: format!("gap-{index}"),
            task_id: format!("task-{index}"),
        }
    }

    #[test]
    fn failed_subset_selects_failed_positions() {
        let outcome = BatchOutcome {
            succeeded_count: 2,
            created: vec![created(0), created(2)],
            failures: vec![failure(1)],
        };
        let items = vec!["a", "b", "c"];
        assert_eq!(outcome.failed_subset(&items), vec!["b"]);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn absorb_retry_translates_indices() {
        let mut outcome = BatchOutcome {
            succeeded_count: 1,
            created: vec![created(1)],
            failures: vec![failure(0), failure(2)],
        };

        // Retry of [item 0, item 2]: first succeeds, second fails again.
        let retry = BatchOutcome {
            succeeded_count: 1,
            created: vec![CreatedTask {
                index: 0,
                gap_id: "gap-0".to_string(),
                task_id: "task-0".to_string(),
            }],
            failures: vec![BatchFailure {
                index: 1,
                gap_id: "gap-2".to_string(),
                reason: "still down".to_string(),
            }],
        };

        outcome.absorb_retry(retry);

        assert_eq!(outcome.succeeded_count, 2);
        assert_eq!(
            outcome.created.iter().map(|c| c.index).collect::<Vec<_>>(),
            vec![0, 1]
        );
        assert_eq!(outcome.failed_indices(), vec![2]);
        assert_eq!(outcome.failures[0].reason, "still down");
    }
}
