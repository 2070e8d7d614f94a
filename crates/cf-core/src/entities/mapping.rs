use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MappingStrength;

/// A curated association between controls in two frameworks.
///
/// Immutable once added to a registry. The relation is undirected for lookup
/// purposes: `source` and `target` only record how it was authored.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ControlMapping {
    pub id: String,
    pub source_framework_id: String,
    pub source_control_id: String,
    pub target_framework_id: String,
    pub target_control_id: String,
    pub strength: MappingStrength,
    pub rationale: String,
}

impl ControlMapping {
    /// Whether `control_id` appears on either side.
    #[must_use]
    pub fn involves(&self, control_id: &str) -> bool {
        self.source_control_id == control_id || self.target_control_id == control_id
    }

    /// The `(framework_id, control_id)` on the opposite side from `control_id`.
    ///
    /// Returns `None` when the control is not part of this mapping. A mapping
    /// from a control to itself returns the same pair.
    #[must_use]
    pub fn other_side(&self, control_id: &str) -> Option<(&str, &str)> {
        if self.source_control_id == control_id {
            Some((&self.target_framework_id, &self.target_control_id))
        } else if self.target_control_id == control_id {
            Some((&self.source_framework_id, &self.source_control_id))
        } else {
            None
        }
    }

    /// Whether this mapping joins the two frameworks, in either direction.
    #[must_use]
    pub fn connects(&self, framework_a: &str, framework_b: &str) -> bool {
        (self.source_framework_id == framework_a && self.target_framework_id == framework_b)
            || (self.source_framework_id == framework_b && self.target_framework_id == framework_a)
    }
}
