use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// The canonical "fully implemented" response value every gap targets.
pub const FULLY_IMPLEMENTED: u8 = 3;

/// A question whose answer indicates non-compliance or is missing.
///
/// Derived fresh on every analysis call; never persisted by the core.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Gap {
    /// `{assessment_id}-{question_id}`; stable across re-runs.
    pub gap_id: String,
    pub question_id: String,
    pub section_id: String,
    pub category_id: String,
    pub severity: Severity,
    /// The recorded answer, `None` when unanswered or malformed.
    pub current_response: Option<u8>,
    pub recommended_response: u8,
}
