//! # cf-config
//!
//! Layered configuration loading for ComplyFlow using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COMPLYFLOW_*` prefix, `__` as separator)
//! 2. Externally supplied overrides (see [`CfConfig::load_with_env_overrides`])
//! 3. Project-level `.complyflow/config.toml`
//! 4. User-level `~/.config/complyflow/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COMPLYFLOW_SOURCES__FRAMEWORKS_DIR` -> `sources.frameworks_dir`,
//! `COMPLYFLOW_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cf_config::CfConfig;
//!
//! let config = CfConfig::load_with_dotenv().expect("config");
//! println!("frameworks: {}", config.sources.frameworks_dir.display());
//! ```

mod error;
mod general;
mod output;
mod remediation;
mod sources;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use output::OutputConfig;
pub use remediation::RemediationConfig;
pub use sources::SourcesConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Value,
};
use serde::{Deserialize, Serialize};

/// Project-local state directory.
pub const PROJECT_DIR: &str = ".complyflow";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "COMPLYFLOW_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CfConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub remediation: RemediationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CfConfig {
    /// Load configuration from all sources, with the current directory as the
    /// project root.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed, or
    /// `ConfigError::InvalidValue` if the merged result fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_in(Path::new("."))
    }

    /// Load configuration with `project_root` as the project directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_in(project_root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_in(project_root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with extra `COMPLYFLOW_*` pairs from an external
    /// source (a secrets manager, a CI matrix). They layer above the TOML
    /// files and below the real process environment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let mut figment = Self::file_layers(Path::new("."));
        for (key, value) in overrides {
            let Some(path) = env_key_to_path(key) else {
                continue;
            };
            let value: Value = value.parse().unwrap_or_else(|_| Value::from(value.clone()));
            figment = figment.merge(Serialized::default(&path, value));
        }
        let config: Self = figment.merge(Self::env()).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain rooted at the current directory.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_in(Path::new("."))
    }

    /// Build the figment provider chain rooted at `project_root`.
    #[must_use]
    pub fn figment_in(project_root: &Path) -> Figment {
        Self::file_layers(project_root).merge(Self::env())
    }

    /// Check values that deserialize fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.remediation.assigned_by.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "remediation.assigned_by".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the project-local config file under `project_root`.
    #[must_use]
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("config.toml")
    }

    fn file_layers(project_root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = Self::project_config_path(project_root);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("complyflow").join("config.toml"))
    }
}

/// `COMPLYFLOW_SOURCES__FRAMEWORKS_DIR` -> `sources.frameworks_dir`.
fn env_key_to_path(key: &str) -> Option<String> {
    let rest = key.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_ascii_lowercase().replace("__", "."))
}
