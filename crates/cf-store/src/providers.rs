//! File-backed framework provider and input loaders.

use std::path::{Path, PathBuf};

use cf_analysis::{FrameworkProvider, InMemoryFrameworks};
use cf_core::entities::{Assessment, Framework, LibraryEvidence};
use serde_json::Value;

use crate::error::StoreError;
use crate::ingest;

fn read_json(path: &Path) -> Result<Value, StoreError> {
    let raw = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Frameworks loaded from every `*.json` file in a directory.
///
/// Files are read once, in file-name order, and each goes through the
/// ingestion adapter. Two files defining the same framework id is an error.
#[derive(Debug, Clone)]
pub struct DirectoryFrameworks {
    dir: PathBuf,
    frameworks: InMemoryFrameworks,
}

impl DirectoryFrameworks {
    /// Load every framework catalog in `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be listed, or the
    /// first parse / ingest error encountered, naming the offending file.
    pub fn load(dir: &Path) -> Result<Self, StoreError> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .map_err(|e| StoreError::io(dir, e))?
            .map(|entry| entry.map(|entry| entry.path()).map_err(|e| StoreError::io(dir, e)))
            .collect::<Result<_, _>>()?;
        paths.retain(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"));
        paths.sort();

        let mut frameworks = InMemoryFrameworks::new();
        for path in &paths {
            let framework = load_framework(path)?;
            if frameworks.framework(&framework.id).is_some() {
                return Err(StoreError::ingest(
                    "framework",
                    format!("{} redefines framework {}", path.display(), framework.id),
                ));
            }
            tracing::debug!(
                path = %path.display(),
                framework_id = %framework.id,
                questions = framework.question_count(),
                "loaded framework"
            );
            frameworks.insert(framework);
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            frameworks,
        })
    }

    /// The directory the frameworks were loaded from.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl FrameworkProvider for DirectoryFrameworks {
    fn framework(&self, framework_id: &str) -> Option<&Framework> {
        self.frameworks.framework(framework_id)
    }

    fn framework_ids(&self) -> Vec<String> {
        self.frameworks.framework_ids()
    }
}

/// Load a single framework catalog.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read, parsed, or ingested.
pub fn load_framework(path: &Path) -> Result<Framework, StoreError> {
    ingest::framework_from_value(&read_json(path)?)
}

/// Load an exported assessment.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read, parsed, or ingested.
pub fn load_assessment(path: &Path) -> Result<Assessment, StoreError> {
    let assessment = ingest::assessment_from_value(&read_json(path)?)?;
    tracing::debug!(
        path = %path.display(),
        assessment_id = %assessment.id,
        responses = assessment.responses.len(),
        "loaded assessment"
    );
    Ok(assessment)
}

/// Load the organization evidence library.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read, parsed, or ingested.
pub fn load_evidence_library(path: &Path) -> Result<Vec<LibraryEvidence>, StoreError> {
    ingest::library_from_value(&read_json(path)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn write(dir: &Path, name: &str, value: &Value) {
        std::fs::write(dir.join(name), serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    fn catalog(id: &str) -> Value {
        json!({
            "id": id,
            "name": id.to_uppercase(),
            "version": "1.0",
            "sections": [{"id": "s", "name": "Protect", "categories": [
                {"id": "c", "name": "Access", "questions": [
                    {"id": format!("{id}-q1"), "text": "Is access reviewed?"}
                ]}
            ]}]
        })
    }

    #[test]
    fn loads_every_json_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.json", &catalog("beta"));
        write(tmp.path(), "a.json", &catalog("alpha"));
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let provider = DirectoryFrameworks::load(tmp.path()).unwrap();
        assert_eq!(provider.len(), 2);
        assert_eq!(provider.framework_ids(), vec!["alpha", "beta"]);
        assert_eq!(
            provider.framework("beta").unwrap().sections[0].categories[0].questions[0].id,
            "beta-q1"
        );
        assert!(provider.framework("gamma").is_none());
    }

    #[test]
    fn duplicate_framework_ids_are_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.json", &catalog("alpha"));
        write(tmp.path(), "b.json", &catalog("alpha"));

        let err = DirectoryFrameworks::load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("redefines framework alpha"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = DirectoryFrameworks::load(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();

        let err = DirectoryFrameworks::load(tmp.path()).unwrap_err();
        match err {
            StoreError::Parse { path, .. } => assert!(path.ends_with("broken.json")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn loads_assessment_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("assessment.json");
        write(
            tmp.path(),
            "assessment.json",
            &json!({
                "id": "asm-1",
                "framework_id": "alpha",
                "updated_at": "2026-05-01T00:00:00Z",
                "responses": {"alpha-q1": 1}
            }),
        );

        let assessment = load_assessment(&path).unwrap();
        assert_eq!(assessment.id, "asm-1");
        assert_eq!(assessment.responses.get("alpha-q1"), Some(1));
    }
}
