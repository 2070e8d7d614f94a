use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EvidenceType;

/// Raw answers keyed by question id.
///
/// Values are conventionally `0..=3`; a missing key means the question was
/// not answered. Ordered so that serialized output is stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(transparent)]
pub struct ResponseMap(BTreeMap<String, i64>);

impl ResponseMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one.
    pub fn insert(&mut self, question_id: impl Into<String>, value: i64) {
        self.0.insert(question_id.into(), value);
    }

    /// The raw recorded value, if any.
    #[must_use]
    pub fn get(&self, question_id: &str) -> Option<i64> {
        self.0.get(question_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(id, value)| (id.as_str(), *value))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ResponseMap {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A piece of evidence attached directly to a question during the assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EvidenceRef {
    /// Stable id; derived from the question and position when absent.
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    pub control_id: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// An item in the organization-wide evidence library.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct LibraryEvidence {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub evidence_type: EvidenceType,
    /// Question this item was collected for, if any.
    pub question_id: Option<String>,
    pub control_id: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// A completed self-assessment against one framework.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Assessment {
    pub id: String,
    pub framework_id: String,
    #[serde(default)]
    pub responses: ResponseMap,
    /// Evidence references per question id.
    #[serde(default)]
    pub evidence: BTreeMap<String, Vec<EvidenceRef>>,
    /// Library evidence ids linked to each question id.
    #[serde(default)]
    pub evidence_links: BTreeMap<String, Vec<String>>,
    pub updated_at: DateTime<Utc>,
}

impl Assessment {
    /// Number of evidence references, counting both direct attachments and
    /// library links.
    #[must_use]
    pub fn evidence_reference_count(&self) -> usize {
        let direct: usize = self.evidence.values().map(Vec::len).sum();
        let linked: usize = self.evidence_links.values().map(Vec::len).sum();
        direct + linked
    }

    #[must_use]
    pub fn has_evidence(&self) -> bool {
        self.evidence_reference_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment() -> Assessment {
        Assessment {
            id: "asm-1".to_string(),
            framework_id: "fw".to_string(),
            responses: ResponseMap::new(),
            evidence: BTreeMap::new(),
            evidence_links: BTreeMap::new(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn response_map_collects_and_reads() {
        let map: ResponseMap = [("AC-1", 1), ("AC-2", 3)].into_iter().collect();
        assert_eq!(map.get("AC-1"), Some(1));
        assert_eq!(map.get("AC-9"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn response_map_serializes_as_plain_object() {
        let map: ResponseMap = [("AC-1", 1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"AC-1":1}"#);
    }

    #[test]
    fn empty_evidence_lists_do_not_count() {
        let mut asm = assessment();
        asm.evidence.insert("AC-1".to_string(), Vec::new());
        assert!(!asm.has_evidence());

        asm.evidence_links
            .insert("AC-1".to_string(), vec!["lib-1".to_string()]);
        assert!(asm.has_evidence());
        assert_eq!(asm.evidence_reference_count(), 1);
    }
}
