//! YAML configuration file support.
//!
//! All lookup tuning lives in one document and every field has a default,
//! so a partial file (or none at all) is valid. Example:
//!
//! ```yaml
//! version: "1.0"
//! name: "production lookup"
//!
//! normalize:
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: true
//!
//! matcher:
//!   threshold: 0.6
//!   limit: 5
//!
//! cache:
//!   capacity: 256
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use normalize::NormalizeConfig;

use crate::cache::CacheConfig;
use matcher::MatchConfig;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for the lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct LookupConfig {
    /// Configuration format version.
    #[serde(default = "default_config_version")]
    pub version: String,

    /// Optional configuration name/description.
    #[serde(default)]
    pub name: Option<String>,

    /// Normalization applied to record names, aliases, and queries.
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Matching thresholds and result limits.
    #[serde(default)]
    pub matcher: MatchConfig,

    /// Query cache sizing.
    #[serde(default)]
    pub cache: CacheConfig,
}

impl LookupConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: LookupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigError::UnsupportedVersion(v.to_string())),
        }

        self.matcher
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.cache.capacity == 0 {
            return Err(ConfigError::Validation(
                "cache.capacity must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            name: None,
            normalize: NormalizeConfig::default(),
            matcher: MatchConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

fn default_config_version() -> String {
    "1.0".to_string()
}
