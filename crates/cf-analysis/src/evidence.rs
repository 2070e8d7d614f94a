//! Evidence extraction, independent of gap status.
//!
//! Records are emitted in three passes:
//! 1. references attached directly to a question in the assessment
//! 2. library items explicitly linked to a question by the assessment
//! 3. library items that name a question themselves and were not emitted yet
//!
//! A library item already emitted for any question is skipped by pass 3, and
//! the same (evidence, question) pair is never emitted twice.

use std::collections::{BTreeMap, HashMap, HashSet};

use cf_core::entities::{Assessment, EvidenceRecord, EvidenceRef, LibraryEvidence};
use cf_core::ids;

/// Metadata key recording which pass produced a record.
pub const ORIGIN_KEY: &str = "origin";

#[derive(Default)]
struct Emitter {
    records: Vec<EvidenceRecord>,
    pairs: HashSet<(String, String)>,
    evidence_ids: HashSet<String>,
}

impl Emitter {
    fn push(&mut self, record: EvidenceRecord) {
        let pair = (
            record.evidence_id.clone(),
            record.source_question_id.clone(),
        );
        if !self.pairs.insert(pair) {
            tracing::debug!(
                evidence_id = %record.evidence_id,
                question_id = %record.source_question_id,
                "skipping duplicate evidence"
            );
            return;
        }
        self.evidence_ids.insert(record.evidence_id.clone());
        self.records.push(record);
    }
}

fn with_origin(
    metadata: &BTreeMap<String, serde_json::Value>,
    origin: &str,
) -> BTreeMap<String, serde_json::Value> {
    let mut metadata = metadata.clone();
    metadata
        .entry(ORIGIN_KEY.to_string())
        .or_insert_with(|| serde_json::Value::String(origin.to_string()));
    metadata
}

fn from_reference(
    assessment: &Assessment,
    question_id: &str,
    index: usize,
    reference: &EvidenceRef,
) -> EvidenceRecord {
    EvidenceRecord {
        evidence_id: reference
            .id
            .clone()
            .unwrap_or_else(|| ids::evidence_id(&assessment.id, question_id, index)),
        title: reference.title.clone(),
        description: reference.description.clone(),
        evidence_type: reference.evidence_type,
        source_question_id: question_id.to_string(),
        related_control_id: reference.control_id.clone(),
        uploaded_at: reference.uploaded_at.unwrap_or(assessment.updated_at),
        metadata: with_origin(&reference.metadata, "assessment"),
    }
}

fn from_library(item: &LibraryEvidence, question_id: &str, origin: &str) -> EvidenceRecord {
    EvidenceRecord {
        evidence_id: item.id.clone(),
        title: item.title.clone(),
        description: item.description.clone(),
        evidence_type: item.evidence_type,
        source_question_id: question_id.to_string(),
        related_control_id: item.control_id.clone(),
        uploaded_at: item.uploaded_at,
        metadata: with_origin(&item.metadata, origin),
    }
}

/// Normalize an assessment's evidence, consulting the optional library.
#[must_use]
pub fn extract_evidence(assessment: &Assessment, library: &[LibraryEvidence]) -> Vec<EvidenceRecord> {
    let by_id: HashMap<&str, &LibraryEvidence> =
        library.iter().map(|item| (item.id.as_str(), item)).collect();
    let mut emitter = Emitter::default();

    for (question_id, references) in &assessment.evidence {
        for (index, reference) in references.iter().enumerate() {
            emitter.push(from_reference(assessment, question_id, index, reference));
        }
    }

    for (question_id, evidence_ids) in &assessment.evidence_links {
        for evidence_id in evidence_ids {
            match by_id.get(evidence_id.as_str()) {
                Some(item) => emitter.push(from_library(item, question_id, "linked")),
                None => tracing::warn!(
                    assessment_id = %assessment.id,
                    %question_id,
                    %evidence_id,
                    "linked evidence not found in library"
                ),
            }
        }
    }

    for item in library {
        let Some(question_id) = item.question_id.as_deref() else {
            continue;
        };
        if emitter.evidence_ids.contains(&item.id) {
            continue;
        }
        emitter.push(from_library(item, question_id, "library"));
    }

    tracing::debug!(
        assessment_id = %assessment.id,
        records = emitter.records.len(),
        "extracted evidence"
    );

    emitter.records
}
