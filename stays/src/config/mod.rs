//! Configuration system for stays.
//!
//! This module provides layered configuration with support for:
//! - A YAML configuration file
//! - Environment variable overrides (`STAYS_*`)
//! - Programmatic configuration via builder pattern
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`STAYS_*`)
//! 3. Configuration file (`{data_dir}/config.yaml`, or an explicit path)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```
//! use stays::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().skip_env().build().unwrap();
//! assert_eq!(config.bind_addr(), "127.0.0.1:3000");
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use stays::config::{Config, ConfigBuilder, ServerConfig};
//!
//! let custom = Config {
//!     server: Some(ServerConfig { bind: "0.0.0.0:9000".to_string() }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.bind_addr(), "0.0.0.0:9000");
//! ```

pub mod loader;
pub mod schema;

use std::path::PathBuf;

use crate::database::default_data_dir;
use crate::error::Result;

pub use schema::{Config, DatabaseSettings, ServerConfig};

/// Builds a [`Config`] by layering file, environment, and programmatic
/// sources.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Creates a new builder with no sources selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from an explicit file path.
    ///
    /// Without this, the builder looks for `{data_dir}/config.yaml` and
    /// loads it when present.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Skips environment variable overrides.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides on top of all other sources.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Builds the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be read or
    /// parsed. A missing default-location file is not an error.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        // File layer
        if let Some(ref path) = self.file {
            config = loader::merge(config, loader::load_file(path)?);
        } else if let Ok(data_dir) = default_data_dir() {
            let default_path = data_dir.join("config.yaml");
            if default_path.exists() {
                config = loader::merge(config, loader::load_file(&default_path)?);
            }
        }

        // Environment layer
        if !self.skip_env {
            config = loader::merge(config, loader::from_env());
        }

        // Programmatic layer
        if let Some(overrides) = self.overrides {
            config = loader::merge(config, overrides);
        }

        Ok(config)
    }
}
