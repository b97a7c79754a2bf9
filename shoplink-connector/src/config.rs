//! Connector configuration file.

use serde::{Deserialize, Serialize};
use shoplink_db::{DbOptions, DEFAULT_BUSY_TIMEOUT};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Where the connector looks for its configuration by default.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level connector settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub db: DbConfig,
}

/// Settings for the endpoint database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbConfig {
    pub path: PathBuf,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT.as_millis() as u64
}

impl ConnectorConfig {
    /// A configuration for the database at `path` with default tuning.
    pub fn for_database(path: impl Into<PathBuf>) -> Self {
        Self {
            db: DbConfig {
                path: path.into(),
                busy_timeout_ms: default_busy_timeout_ms(),
            },
        }
    }

    /// Reads and validates a JSON config file.
    ///
    /// A relative `db.path` is taken relative to the directory holding the
    /// config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&raw)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.resolve_relative_to(base))
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.db.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db.path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Connection options derived from the config.
    pub fn db_options(&self) -> DbOptions {
        DbOptions {
            busy_timeout: Duration::from_millis(self.db.busy_timeout_ms),
            ..DbOptions::default()
        }
    }

    /// Resolves a relative database path against `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        if self.db.path.is_relative() {
            self.db.path = base.join(&self.db.path);
        }
        self
    }
}
