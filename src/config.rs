//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dialect::Dialect;
use crate::output::OutputFormat;

/// Environment variable overriding the user config path.
pub const CONFIG_ENV: &str = "SHELLSPLIT_CONFIG";

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".shellsplit.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Dialect used when `--mode` is not given.
    pub mode: Option<Dialect>,

    /// Output format for `split` when `--format` is not given.
    pub format: Option<OutputFormat>,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging. Unset means off, but lets a project file
    /// tell "not mentioned" apart from an explicit `false`.
    pub enabled: Option<bool>,
    /// Path to audit log file.
    pub path: Option<String>,
}

impl AuditConfig {
    /// Whether audit entries should be written.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(false)
    }
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = Self::user_config_path() {
            if let Some(user_config) = Self::load_file(&path)? {
                config = user_config;
            }
        }

        if let Some(cwd) = cwd {
            if let Some(project_config) = Self::load_file(&cwd.join(PROJECT_CONFIG_FILE))? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Parse a config file. A missing file is not an error.
    pub fn load_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(config))
    }

    /// User config path. `SHELLSPLIT_CONFIG` takes precedence.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("shellsplit").join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for scalars).
    fn merge(&mut self, other: Config) {
        if other.mode.is_some() {
            self.mode = other.mode;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.audit.enabled.is_some() {
            self.audit.enabled = other.audit.enabled;
        }
        if other.audit.path.is_some() {
            self.audit.path = other.audit.path;
        }
    }

    /// Pick the dialect: explicit choice, then config, then host platform.
    pub fn resolve_dialect(&self, explicit: Option<Dialect>) -> Dialect {
        explicit.or(self.mode).unwrap_or_default()
    }

    /// Pick the output format: explicit choice, then config, then lines.
    pub fn resolve_format(&self, explicit: Option<OutputFormat>) -> OutputFormat {
        explicit.or(self.format).unwrap_or_default()
    }
}
