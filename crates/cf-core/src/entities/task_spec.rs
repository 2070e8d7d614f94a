use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FunctionTag, Impact, Severity, TaskStatus};

/// Prioritization hints attached to a task specification.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskMetadata {
    pub business_impact: Impact,
    pub technical_complexity: Impact,
    pub risk_reduction_percent: u8,
    /// Framework ids whose compliance posture this task affects.
    pub compliance_impact: Vec<String>,
}

/// A remediation task handed to the task creation service.
///
/// The service assigns identity and owns the lifecycle; `gap_id` lets it
/// recognise a retried submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaskSpec {
    pub gap_id: String,
    pub title: String,
    pub description: String,
    pub priority: Severity,
    pub function_tag: FunctionTag,
    pub category_id: String,
    pub related_control_id: String,
    pub estimated_hours: u32,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub assigned_by: String,
    pub metadata: TaskMetadata,
}
