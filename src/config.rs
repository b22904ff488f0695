use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reporter::ReportFormat;

pub const DEFAULT_CONFIG_FILE: &str = ".attribute-transform.yaml";

/// Options for detection and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub format: ReportFormat,
    /// Propose reflections as explanations for angle changes
    pub prefer_reflection: bool,
    /// Keep `NoChange` entries in reports
    pub include_no_change: bool,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Console,
            prefer_reflection: true,
            include_no_change: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ComparisonConfig {
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to unit, not to a mapping
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load from an explicit path. Missing or broken files are errors.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config = Self::from_yaml_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `.attribute-transform.yaml` from `dir` if present, defaults otherwise
    pub fn load_from_dir(dir: &Path) -> Self {
        let path = dir.join(DEFAULT_CONFIG_FILE);

        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(_, e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}. Using default config.", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{}. Using default config.", e);
                Self::default()
            }
        }
    }
}
