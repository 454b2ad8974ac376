//! Fluent builder for [`SociographConfig`].

use std::path::PathBuf;

use super::models::*;
use super::Result;

/// Builder for assembling a validated configuration in code.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: SociographConfig,
}

impl ConfigBuilder {
    /// Start from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`ConfigBuilder::new`] for call sites that want to be
    /// explicit about taking defaults.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Use the in-memory edge store.
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.backend = EdgeStorageType::Memory;
        self
    }

    /// Set the minimum log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log output format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Enable or disable stdout logging.
    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.config.logging.stdout = stdout;
        self
    }

    /// Also write logs to a file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.logging.file = Some(path.into());
        self
    }

    /// Validate and produce the configuration.
    pub fn build(self) -> Result<SociographConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
