//! Server configuration module

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Maximum request body size in bytes
    pub max_request_size: usize,

    /// Session token time-to-live in hours
    pub session_ttl_hours: u64,

    /// Seed demo users and tokens on startup (development only)
    pub seed_demo_data: bool,

    /// Path to the sociograph library config file, if any
    pub config_file_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            max_request_size: 1024 * 1024, // 1MB; relationship payloads are tiny
            session_ttl_hours: 24,
            seed_demo_data: false,
            config_file_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables.
    /// CLI arguments take precedence over environment variables.
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut config = Self::default();

        if let Some(port) = cli_args.port {
            config.port = port;
        } else if let Ok(port) = env::var("SOCIOGRAPH_PORT") {
            config.port = port.parse()?;
        }

        if let Some(max_size) = cli_args.max_request_size {
            config.max_request_size = max_size;
        } else if let Ok(max_size) = env::var("SOCIOGRAPH_MAX_REQUEST_SIZE") {
            config.max_request_size = max_size.parse()?;
        }

        if let Some(ttl) = cli_args.session_ttl_hours {
            config.session_ttl_hours = ttl;
        } else if let Ok(ttl) = env::var("SOCIOGRAPH_SESSION_TTL_HOURS") {
            config.session_ttl_hours = ttl.parse()?;
        }

        if let Some(seed) = cli_args.seed_demo_data {
            config.seed_demo_data = seed;
        } else if let Ok(seed) = env::var("SOCIOGRAPH_SEED_DEMO_DATA") {
            config.seed_demo_data = seed.parse().unwrap_or(false);
        }

        if let Some(config_path) = cli_args.config_file {
            config.config_file_path = Some(config_path);
        } else if let Ok(config_path) = env::var("SOCIOGRAPH_CONFIG_FILE") {
            config.config_file_path = Some(PathBuf::from(config_path));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.session_ttl_hours, 24);
        assert!(!config.seed_demo_data);
        assert!(config.config_file_path.is_none());
    }
}
