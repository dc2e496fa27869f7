//! Configuration types for fifth-core.
//!
//! This module defines [`EngineConfig`] (CLI-level overrides) and
//! [`ProjectConfig`] (from `.fifth/config.yaml`). CLI values in
//! `EngineConfig` take precedence over values read from `ProjectConfig`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::error::CoreError;

// ── Engine Configuration (CLI-level) ─────────────────────────

/// Configuration provided by the CLI layer.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use fifth_core::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .work_dir(PathBuf::from("/tmp/project"))
///     .log_file(true)
///     .build();
/// assert_eq!(config.config_path(), PathBuf::from("/tmp/project/.fifth/config.yaml"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct EngineConfig {
    /// Directory holding the `.fifth` folder.
    work_dir: PathBuf,

    /// Override for JSON file logging (takes precedence over config.yaml).
    #[builder(default, setter(strip_option))]
    #[serde(skip_serializing_if = "Option::is_none")]
    log_file: Option<bool>,
}

impl EngineConfig {
    pub fn work_dir(&self) -> &PathBuf {
        &self.work_dir
    }

    pub fn log_file(&self) -> Option<bool> {
        self.log_file
    }

    /// Returns the `.fifth` directory path.
    pub fn fifth_dir(&self) -> PathBuf {
        self.work_dir.join(".fifth")
    }

    /// Returns the path to `config.yaml` inside the `.fifth` directory.
    pub fn config_path(&self) -> PathBuf {
        self.fifth_dir().join("config.yaml")
    }

    /// Returns the directory JSON log files are written to.
    pub fn logs_dir(&self) -> PathBuf {
        self.fifth_dir().join("logs")
    }

    /// Whether file logging is on once the CLI override is applied.
    pub fn file_logging_enabled(&self, project: &ProjectConfig) -> bool {
        self.log_file.unwrap_or(project.logging.file)
    }
}

// ── Project Configuration (.fifth/config.yaml) ──────────────

/// Project-level configuration, deserialized from `.fifth/config.yaml`.
///
/// Every field has a serde default so a partial or empty file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub stack: StackConfig,
}

impl ProjectConfig {
    /// Pick the initial stack: values given on the command line win,
    /// otherwise the configured default.
    pub fn initial_stack(&self, cli: Option<Vec<i64>>) -> Vec<i64> {
        cli.unwrap_or_else(|| self.stack.initial.clone())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// Also write JSON logs under `.fifth/logs/`.
    #[serde(default)]
    pub file: bool,

    /// Log files older than this many days are removed at startup.
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,

    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: false,
            retention_days: default_retention_days(),
            filter: None,
        }
    }
}

impl LoggingConfig {
    pub fn filter_or_default(&self) -> &str {
        self.filter.as_deref().unwrap_or("info")
    }
}

/// Stack defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackConfig {
    /// Initial stack used when none is given on the command line.
    #[serde(default)]
    pub initial: Vec<i64>,
}

fn default_retention_days() -> u64 {
    3
}

// ── Config loading ───────────────────────────────────────────

/// Load [`ProjectConfig`] from `.fifth/config.yaml`.
///
/// If the file does not exist, returns the default configuration.
///
/// # Errors
///
/// Returns `CoreError::Io` if the file exists but cannot be read.
/// Returns `CoreError::Yaml` if the file contains invalid YAML.
pub fn load_project_config(config_path: &Path) -> Result<ProjectConfig, CoreError> {
    if !config_path.exists() {
        return Ok(ProjectConfig::default());
    }
    let content = std::fs::read_to_string(config_path)?;
    let config: ProjectConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}
