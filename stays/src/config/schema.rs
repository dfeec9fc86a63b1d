//! Configuration schema definitions.
//!
//! This module defines the configuration structure for the stays service:
//! data directory, database settings, and the server bind address.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete configuration structure.
///
/// All fields are optional in the serialized form; unset fields fall back
/// to built-in defaults at the point of use.
///
/// # Examples
///
/// ```
/// use stays::config::{Config, ServerConfig};
///
/// let config = Config {
///     server: Some(ServerConfig {
///         bind: "127.0.0.1:8080".to_string(),
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.bind_addr(), "127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Data directory holding the database file. Defaults to `~/.stays`.
    pub data_dir: Option<PathBuf>,

    /// Database settings.
    pub database: Option<DatabaseSettings>,

    /// Server settings.
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Returns the effective busy timeout in milliseconds.
    #[must_use]
    pub fn busy_timeout_ms(&self) -> u64 {
        self.database
            .as_ref()
            .and_then(|db| db.busy_timeout_ms)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Returns the effective server bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        self.server
            .as_ref()
            .map_or_else(|| DEFAULT_BIND_ADDR.to_string(), |s| s.bind.clone())
    }
}

/// Default busy timeout applied when the configuration does not set one.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Default bind address applied when the configuration does not set one.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Database settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Maximum time to wait for a contended database lock (milliseconds).
    pub busy_timeout_ms: Option<u64>,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    pub bind: String,
}
