use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceType;

/// A normalized piece of evidence tied to the question it supports.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvidenceRecord {
    pub evidence_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub source_question_id: String,
    pub related_control_id: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}
