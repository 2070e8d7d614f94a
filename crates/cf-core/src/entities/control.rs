use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ControlStatus, Severity};

/// A control record to be created for a gap. Projected directly from the gap.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ControlStub {
    pub control_id: String,
    pub name: String,
    pub description: String,
    pub framework_id: String,
    pub category_id: String,
    pub priority: Severity,
    pub status: ControlStatus,
    pub related_gap_id: String,
    pub related_question_id: String,
}
