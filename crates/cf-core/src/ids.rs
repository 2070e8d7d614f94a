//! Deterministic id derivation.
//!
//! Every derived artifact id is a pure function of its inputs, so re-running
//! an analysis over the same assessment yields the same ids. Downstream
//! collaborators rely on this for idempotent retry.

/// Prefix for control stub ids.
pub const PREFIX_CONTROL: &str = "ctl";

/// Infix for derived evidence ids.
pub const INFIX_EVIDENCE: &str = "ev";

/// Gap id for an (assessment, question) pair.
#[must_use]
pub fn gap_id(assessment_id: &str, question_id: &str) -> String {
    format!("{assessment_id}-{question_id}")
}

/// Control stub id derived from the gap it remediates.
#[must_use]
pub fn control_id(gap_id: &str) -> String {
    format!("{PREFIX_CONTROL}-{gap_id}")
}

/// Evidence id for a raw reference that arrived without one.
#[must_use]
pub fn evidence_id(assessment_id: &str, question_id: &str, index: usize) -> String {
    format!("{assessment_id}-{question_id}-{INFIX_EVIDENCE}{index}")
}
