use std::path::Path;

use serde::{Deserialize, Serialize};
use tablewright_generate::{ExportFormat, ScriptOptions};
use thiserror::Error;

/// File read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tablewright.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contents of `tablewright.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub script: ScriptOptions,
    pub export: ExportSettings,
    pub validation: ValidationSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub format: ExportFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Run the performance/best-practice/security heuristics.
    pub advanced: bool,
}

/// Load the config at `path`, or the default file when `path` is `None`.
///
/// A missing default file yields defaults; a missing explicit file is an
/// error.
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        return Ok(CliConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<CliConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}
