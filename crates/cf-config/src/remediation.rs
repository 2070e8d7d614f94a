//! Defaults applied to synthesized remediation tasks.

use serde::{Deserialize, Serialize};

fn default_assigned_by() -> String {
    "complyflow".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemediationConfig {
    /// Recorded as the assigner on every task.
    #[serde(default = "default_assigned_by")]
    pub assigned_by: String,

    /// Assignees given to every task unless overridden on the command line.
    #[serde(default)]
    pub default_assignees: Vec<String>,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            assigned_by: default_assigned_by(),
            default_assignees: Vec::new(),
        }
    }
}
