//! Configuration loading using Figment
//!
//! Sources in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. An optional config file (TOML, YAML or JSON, picked by extension)
//! 3. Environment variables prefixed `TASKBOARD_`, nested with `__`
//!    (e.g. `TASKBOARD_TRANSACTION__TIMEOUT_MS=2000`)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use taskboard_store::TransactionOptions;
use thiserror::Error;
use tracing::debug;

use crate::activity::{ActivitySink, JsonlActivityLog, NullActivitySink};

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file format not supported
    #[error("unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Configuration parsing failed
    #[error("failed to parse configuration: {source}")]
    ParseError {
        #[source]
        source: Box<figment::Error>,
    },

    /// Configuration validation failed
    #[error("configuration validation failed: {message}")]
    ValidationError { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::ParseError {
            source: Box::new(error),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Bounds for every repositioning transaction
    pub transaction: TransactionOptions,

    /// JSONL file for the activity log; `None` disables file logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_log: Option<PathBuf>,
}

impl KanbanConfig {
    pub const ENV_PREFIX: &'static str = "TASKBOARD_";

    /// Defaults overridden by environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::base_figment())
    }

    /// Defaults, then `path`, then environment variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let file = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Figment::from(Toml::file(path)),
            Some("yaml") | Some("yml") => Figment::from(Yaml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        debug!(path = %path.display(), "loading configuration file");

        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(file)
            .merge(Self::env());
        Self::extract(figment)
    }

    fn base_figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Self::env())
    }

    fn env() -> Env {
        Env::prefixed(Self::ENV_PREFIX).split("__")
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Reject settings that would make every transaction fail
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transaction.max_wait.is_zero() {
            return Err(ConfigError::ValidationError {
                message: "transaction.max_wait_ms must be greater than 0".into(),
            });
        }
        if self.transaction.timeout.is_zero() {
            return Err(ConfigError::ValidationError {
                message: "transaction.timeout_ms must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// The sink this configuration asks for
    pub fn activity_sink(&self) -> Arc<dyn ActivitySink> {
        match &self.activity_log {
            Some(path) => Arc::new(JsonlActivityLog::new(path.clone())),
            None => Arc::new(NullActivitySink),
        }
    }
}
