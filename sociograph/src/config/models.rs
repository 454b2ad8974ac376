//! Configuration model definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::ConfigError;

/// Main configuration structure for Sociograph.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SociographConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SociographConfig {
    /// Validate the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(file) = &self.logging.file {
            if file.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "logging.file must not be empty when set".to_string(),
                ));
            }
            if file.is_dir() {
                return Err(ConfigError::ValidationError(format!(
                    "logging.file points at a directory: {}",
                    file.display()
                )));
            }
        }
        if !self.logging.stdout && self.logging.file.is_none() {
            return Err(ConfigError::ValidationError(
                "logging must write somewhere: enable stdout or set a file".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration for the edge storage backend.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Which edge store backend to use
    pub backend: EdgeStorageType,
}

/// Edge storage backend type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStorageType {
    /// Process-local concurrent map. Data does not survive restarts.
    #[default]
    Memory,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level to emit
    pub level: LogLevel,

    /// Output format
    pub format: LogFormat,

    /// Whether to log to stdout
    pub stdout: bool,

    /// Optional log file path
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            stdout: true,
            file: None,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{name}")
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(ConfigError::ParseError(format!(
                "invalid log level: {other}"
            ))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}
