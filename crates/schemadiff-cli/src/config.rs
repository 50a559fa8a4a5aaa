//! CLI configuration
//!
//! Read from `.schemadiff/config.toml` under the working directory, or from
//! an explicit `--config` path. A missing workspace file means defaults.

use schemadiff_core::logging_facility::Profile;
use schemadiff_core::{ExError, ExErrorKind};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_DIR_NAME: &str = ".schemadiff";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemadiffConfig {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Hide unchanged rows in schema diffs
    pub changed_only: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub profile: Profile,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        ExError::new(ExErrorKind::Config)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

pub fn config_dir(workspace_root: impl AsRef<Path>) -> PathBuf {
    workspace_root.as_ref().join(CONFIG_DIR_NAME)
}

pub fn config_path(workspace_root: impl AsRef<Path>) -> PathBuf {
    config_dir(workspace_root).join(CONFIG_FILE_NAME)
}

/// Load the workspace config, falling back to defaults when absent
pub fn load_workspace_config(
    workspace_root: impl AsRef<Path>,
) -> Result<SchemadiffConfig, ConfigError> {
    let path = config_path(workspace_root);
    if !path.exists() {
        return Ok(SchemadiffConfig::default());
    }
    load_config_file(path)
}

/// Load an explicitly named config file; the file must exist
pub fn load_config_file(path: impl AsRef<Path>) -> Result<SchemadiffConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    Ok(toml::from_str(&raw)?)
}

impl SchemadiffConfig {
    /// Command-line format wins over the configured one
    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.unwrap_or(self.output.format)
    }
}
