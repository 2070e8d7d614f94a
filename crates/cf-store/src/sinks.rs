//! JSONL-backed collaborator implementations.
//!
//! Each sink appends one JSON object per line with
//! `serde_jsonlines::append_json_lines`, and rebuilds its in-memory index from
//! the existing file on open so that re-runs stay idempotent.
//!
//! The sinks target local, low-volume output (one line per gap). Writes are
//! plain blocking appends made under a `std::sync::Mutex` with no await point
//! in between, so a write is never interleaved with another and the lock is
//! never held across a suspension. A remote or high-volume service should
//! implement the collaborator traits directly instead.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use cf_core::entities::{ControlStub, TaskSpec};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::service::{ControlPersistenceService, TaskCreationService};

/// Id assigned to the task created for `gap_id`.
#[must_use]
pub fn task_id(gap_id: &str) -> String {
    format!("task-{gap_id}")
}

/// One line of the task sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    pub task_id: String,
    pub created_at: DateTime<Utc>,
    pub spec: TaskSpec,
}

fn prepare(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

fn read_lines<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    serde_jsonlines::json_lines(path)
        .map_err(|e| StoreError::io(path, e))?
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| StoreError::io(path, e))
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

/// Task sink writing `{task_id, created_at, spec}` lines.
///
/// Idempotent by gap id: submitting a spec whose gap already has a task
/// returns the existing task id without writing.
#[derive(Debug)]
pub struct JsonlTaskSink {
    path: PathBuf,
    by_gap: Mutex<BTreeMap<String, String>>,
}

impl JsonlTaskSink {
    /// Open the sink at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created or an
    /// existing file cannot be read back.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        prepare(&path)?;
        let by_gap = read_lines::<TaskRecord>(&path)?
            .into_iter()
            .map(|record| (record.spec.gap_id, record.task_id))
            .collect();
        Ok(Self {
            path,
            by_gap: Mutex::new(by_gap),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every record written so far, in write order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read.
    pub fn records(&self) -> Result<Vec<TaskRecord>, StoreError> {
        read_lines(&self.path)
    }

    /// The task id already recorded for `gap_id`, if any.
    #[must_use]
    pub fn existing(&self, gap_id: &str) -> Option<String> {
        self.lock().get(gap_id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.by_gap.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn create(&self, spec: &TaskSpec) -> Result<String, StoreError> {
        let mut by_gap = self.lock();
        if let Some(existing) = by_gap.get(&spec.gap_id) {
            tracing::debug!(gap_id = %spec.gap_id, task_id = %existing, "task already exists");
            return Ok(existing.clone());
        }

        let record = TaskRecord {
            task_id: task_id(&spec.gap_id),
            created_at: Utc::now(),
            spec: spec.clone(),
        };
        serde_jsonlines::append_json_lines(&self.path, [&record])
            .map_err(|e| StoreError::io(&self.path, e))?;
        by_gap.insert(spec.gap_id.clone(), record.task_id.clone());
        Ok(record.task_id)
    }
}

impl TaskCreationService for JsonlTaskSink {
    async fn create_task(&self, spec: &TaskSpec) -> Result<String, StoreError> {
        self.create(spec)
    }
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// Control sink writing one `ControlStub` per line.
///
/// Controls whose id is already in the file are skipped.
#[derive(Debug)]
pub struct JsonlControlSink {
    path: PathBuf,
    written: Mutex<BTreeSet<String>>,
}

impl JsonlControlSink {
    /// Open the sink at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created or an
    /// existing file cannot be read back.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        prepare(&path)?;
        let written = read_lines::<ControlStub>(&path)?
            .into_iter()
            .map(|control| control.control_id)
            .collect();
        Ok(Self {
            path,
            written: Mutex::new(written),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every control written so far, in write order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file cannot be read.
    pub fn records(&self) -> Result<Vec<ControlStub>, StoreError> {
        read_lines(&self.path)
    }

    fn persist(&self, controls: &[ControlStub]) -> Result<usize, StoreError> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        let mut batch_ids = BTreeSet::new();
        let fresh: Vec<&ControlStub> = controls
            .iter()
            .filter(|control| {
                !written.contains(&control.control_id) && batch_ids.insert(control.control_id.as_str())
            })
            .collect();

        if fresh.is_empty() {
            return Ok(0);
        }

        serde_jsonlines::append_json_lines(&self.path, &fresh)
            .map_err(|e| StoreError::io(&self.path, e))?;
        written.extend(fresh.iter().map(|control| control.control_id.clone()));
        Ok(fresh.len())
    }
}

impl ControlPersistenceService for JsonlControlSink {
    async fn persist_controls(&self, controls: &[ControlStub]) -> Result<usize, StoreError> {
        self.persist(controls)
    }
}

#[cfg(test)]
mod tests {
    use cf_core::enums::{ControlStatus, FunctionTag, Impact, Severity, TaskStatus};
    use cf_core::entities::TaskMetadata;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn spec(gap_id: &str) -> TaskSpec {
        TaskSpec {
            gap_id: gap_id.to_string(),
            title: format!("Remediate {gap_id}"),
            description: String::new(),
            priority: Severity::High,
            function_tag: FunctionTag::Protect,
            category_id: "c".to_string(),
            related_control_id: format!("ctl-{gap_id}"),
            estimated_hours: 24,
            due_date: Utc::now(),
            status: TaskStatus::NotStarted,
            assignees: Vec::new(),
            assigned_by: "complyflow".to_string(),
            metadata: TaskMetadata {
                business_impact: Impact::High,
                technical_complexity: Impact::Medium,
                risk_reduction_percent: 60,
                compliance_impact: Vec::new(),
            },
        }
    }

    fn control(id: &str) -> ControlStub {
        ControlStub {
            control_id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            framework_id: "fw".to_string(),
            category_id: "c".to_string(),
            priority: Severity::Medium,
            status: ControlStatus::NotImplemented,
            related_gap_id: id.trim_start_matches("ctl-").to_string(),
            related_question_id: "q".to_string(),
        }
    }

    #[tokio::test]
    async fn task_sink_is_idempotent_by_gap() {
        let tmp = TempDir::new().unwrap();
        let sink = JsonlTaskSink::open(tmp.path().join("out/tasks.jsonl")).unwrap();

        let first = sink.create_task(&spec("asm-q1")).await.unwrap();
        let again = sink.create_task(&spec("asm-q1")).await.unwrap();
        assert_eq!(first, "task-asm-q1");
        assert_eq!(again, first);
        assert_eq!(sink.records().unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_submissions_write_one_task() {
        let tmp = TempDir::new().unwrap();
        let sink = std::sync::Arc::new(JsonlTaskSink::open(tmp.path().join("tasks.jsonl")).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sink = std::sync::Arc::clone(&sink);
                tokio::spawn(async move { sink.create_task(&spec("asm-q1")).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "task-asm-q1");
        }
        assert_eq!(sink.records().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn task_sink_reopens_with_existing_index() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.jsonl");
        {
            let sink = JsonlTaskSink::open(&path).unwrap();
            sink.create_task(&spec("asm-q1")).await.unwrap();
        }

        let reopened = JsonlTaskSink::open(&path).unwrap();
        assert_eq!(reopened.existing("asm-q1").as_deref(), Some("task-asm-q1"));
        reopened.create_task(&spec("asm-q1")).await.unwrap();
        reopened.create_task(&spec("asm-q2")).await.unwrap();

        let gap_ids: Vec<String> = reopened
            .records()
            .unwrap()
            .into_iter()
            .map(|record| record.spec.gap_id)
            .collect();
        assert_eq!(gap_ids, vec!["asm-q1", "asm-q2"]);
    }

    #[tokio::test]
    async fn control_sink_skips_known_ids() {
        let tmp = TempDir::new().unwrap();
        let sink = JsonlControlSink::open(tmp.path().join("controls.jsonl")).unwrap();

        let written = sink
            .persist_controls(&[control("ctl-a"), control("ctl-b"), control("ctl-a")])
            .await
            .unwrap();
        assert_eq!(written, 2);

        let written = sink
            .persist_controls(&[control("ctl-b"), control("ctl-c")])
            .await
            .unwrap();
        assert_eq!(written, 1);

        let ids: Vec<String> = sink
            .records()
            .unwrap()
            .into_iter()
            .map(|c| c.control_id)
            .collect();
        assert_eq!(ids, vec!["ctl-a", "ctl-b", "ctl-c"]);
    }
}
