//! Input locations: framework catalogs, extra mappings, evidence library.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_frameworks_dir() -> PathBuf {
    PathBuf::from("frameworks")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourcesConfig {
    /// Directory scanned for `*.json` framework catalogs.
    #[serde(default = "default_frameworks_dir")]
    pub frameworks_dir: PathBuf,

    /// JSON array of control mappings appended to the curated set.
    /// Empty means curated mappings only.
    #[serde(default)]
    pub mappings_file: String,

    /// Organization evidence library consulted by `cfl evidence`.
    #[serde(default)]
    pub evidence_library: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            frameworks_dir: default_frameworks_dir(),
            mappings_file: String::new(),
            evidence_library: String::new(),
        }
    }
}

impl SourcesConfig {
    #[must_use]
    pub fn mappings_path(&self) -> Option<&Path> {
        non_empty(&self.mappings_file)
    }

    #[must_use]
    pub fn evidence_library_path(&self) -> Option<&Path> {
        non_empty(&self.evidence_library)
    }
}

fn non_empty(value: &str) -> Option<&Path> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| Path::new(trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_paths_are_unset_by_default() {
        let config = SourcesConfig::default();
        assert_eq!(config.frameworks_dir, PathBuf::from("frameworks"));
        assert!(config.mappings_path().is_none());
        assert!(config.evidence_library_path().is_none());
    }

    #[test]
    fn whitespace_counts_as_unset() {
        let config = SourcesConfig {
            mappings_file: "  ".to_string(),
            evidence_library: "library.json".to_string(),
            ..SourcesConfig::default()
        };
        assert!(config.mappings_path().is_none());
        assert_eq!(config.evidence_library_path(), Some(Path::new("library.json")));
    }
}
