//! Configuration system for Sociograph.
//!
//! Supports loading configuration from files and environment
//! variables with defaults and validation.

mod builder;
mod loader;
mod models;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "sociograph.toml",
    "sociograph.json",
    ".sociograph/config.toml",
    ".sociograph/config.json",
];

/// Environment variable prefix for Sociograph configuration
pub const ENV_PREFIX: &str = "SOCIOGRAPH_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("configuration parsing error: {0}")]
    ParseError(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
