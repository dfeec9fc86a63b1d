//! Configuration file loading and environment overrides.
//!
//! Configuration comes from an optional YAML file plus `STAYS_*` environment
//! variables; later sources override earlier ones field by field.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{Config, DatabaseSettings, ServerConfig};
use crate::error::Result;

/// Loads a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed as YAML.
///
/// # Examples
///
/// ```no_run
/// use stays::config::loader::load_file;
/// use std::path::Path;
///
/// let config = load_file(Path::new("/etc/stays/config.yaml")).unwrap();
/// ```
pub fn load_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&contents)?;
    Ok(config)
}

/// Reads configuration overrides from `STAYS_*` environment variables.
///
/// Recognized variables:
/// - `STAYS_DATA_DIR`: data directory
/// - `STAYS_BIND_ADDR`: server bind address
/// - `STAYS_BUSY_TIMEOUT_MS`: database busy timeout in milliseconds
///   (non-numeric values are ignored)
#[must_use]
pub fn from_env() -> Config {
    let mut config = Config::default();

    if let Ok(dir) = env::var("STAYS_DATA_DIR") {
        if !dir.is_empty() {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    if let Ok(bind) = env::var("STAYS_BIND_ADDR") {
        if !bind.is_empty() {
            config.server = Some(ServerConfig { bind });
        }
    }

    if let Ok(timeout) = env::var("STAYS_BUSY_TIMEOUT_MS") {
        if let Ok(ms) = timeout.parse::<u64>() {
            config.database = Some(DatabaseSettings {
                busy_timeout_ms: Some(ms),
            });
        }
    }

    config
}

/// Merges two configurations, with `overlay` winning field by field.
#[must_use]
pub fn merge(base: Config, overlay: Config) -> Config {
    Config {
        data_dir: overlay.data_dir.or(base.data_dir),
        database: overlay.database.or(base.database),
        server: overlay.server.or(base.server),
    }
}
