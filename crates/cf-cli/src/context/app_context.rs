use std::path::{Path, PathBuf};

use anyhow::Context;
use cf_analysis::TaskOptions;
use cf_config::CfConfig;
use cf_core::entities::LibraryEvidence;
use cf_mappings::ControlMappingRegistry;
use cf_store::{DirectoryFrameworks, JsonlControlSink, JsonlTaskSink};

/// Shared application state resolved once at startup.
///
/// Collaborators (framework catalogs, sinks, the mapping registry) are
/// opened lazily by the command that needs them, so `cfl mappings` never
/// touches the frameworks directory and `cfl analyze` never opens a sink.
pub struct AppContext {
    pub config: CfConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    #[must_use]
    pub fn new(project_root: PathBuf, config: CfConfig) -> Self {
        Self {
            config,
            project_root,
        }
    }

    /// Resolve a configured path against the project root.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Load every framework catalog from `sources.frameworks_dir`.
    pub fn frameworks(&self) -> anyhow::Result<DirectoryFrameworks> {
        let dir = self.resolve(&self.config.sources.frameworks_dir);
        DirectoryFrameworks::load(&dir)
            .with_context(|| format!("failed to load frameworks from {}", dir.display()))
    }

    /// The curated mappings plus `sources.mappings_file` when configured.
    pub fn mappings(&self) -> anyhow::Result<ControlMappingRegistry> {
        let registry = ControlMappingRegistry::with_curated();
        if let Some(path) = self.config.sources.mappings_path() {
            let path = self.resolve(path);
            let added = registry
                .extend_from_json(&path)
                .with_context(|| format!("failed to load mappings from {}", path.display()))?;
            tracing::debug!(path = %path.display(), added, "loaded extra mappings");
        }
        Ok(registry)
    }

    /// The evidence library from `override_path`, else `sources.evidence_library`,
    /// else empty.
    pub fn evidence_library(
        &self,
        override_path: Option<&Path>,
    ) -> anyhow::Result<Vec<LibraryEvidence>> {
        let Some(path) = override_path.or_else(|| self.config.sources.evidence_library_path())
        else {
            return Ok(Vec::new());
        };
        let path = self.resolve(path);
        cf_store::load_evidence_library(&path)
            .with_context(|| format!("failed to load evidence library {}", path.display()))
    }

    pub fn task_sink(&self) -> anyhow::Result<JsonlTaskSink> {
        let path = self.resolve(&self.config.output.tasks_file);
        JsonlTaskSink::open(&path)
            .with_context(|| format!("failed to open task sink {}", path.display()))
    }

    pub fn control_sink(&self) -> anyhow::Result<JsonlControlSink> {
        let path = self.resolve(&self.config.output.controls_file);
        JsonlControlSink::open(&path)
            .with_context(|| format!("failed to open control sink {}", path.display()))
    }

    /// Task assignment: explicit assignees win over `remediation.default_assignees`.
    #[must_use]
    pub fn task_options(&self, assignees: &[String]) -> TaskOptions {
        let assignees = if assignees.is_empty() {
            self.config.remediation.default_assignees.clone()
        } else {
            assignees.to_vec()
        };
        TaskOptions {
            assignees,
            assigned_by: self.config.remediation.assigned_by.clone(),
        }
    }
}
