//! Locations of the JSONL persistence sinks.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_tasks_file() -> PathBuf {
    PathBuf::from(".complyflow/tasks.jsonl")
}

fn default_controls_file() -> PathBuf {
    PathBuf::from(".complyflow/controls.jsonl")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_tasks_file")]
    pub tasks_file: PathBuf,

    #[serde(default = "default_controls_file")]
    pub controls_file: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            tasks_file: default_tasks_file(),
            controls_file: default_controls_file(),
        }
    }
}
