//! Bootstrap configuration loading and data root resolution
//!
//! Settings come from, in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: defaults are used and a warning is
//! logged.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the data root
pub const DATA_ROOT_ENV: &str = "SSP_DATA_ROOT";

/// Environment variable pointing at an alternate config file
pub const CONFIG_PATH_ENV: &str = "SSP_CONFIG";

/// Bootstrap configuration loaded from TOML
///
/// Every field is optional; absent values fall back to [`CompiledDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Root of the date-partitioned export tree
    #[serde(default)]
    pub data_root: Option<PathBuf>,

    /// URL scheme of the upstream API (`https` or `http`)
    #[serde(default)]
    pub schema: Option<String>,

    /// Upstream host name, optionally with port
    #[serde(default)]
    pub host: Option<String>,

    /// Soft failures tolerated before a pipeline aborts
    #[serde(default)]
    pub max_errors: Option<usize>,

    /// Maximum detail fetches in flight at once
    #[serde(default)]
    pub max_parallelism: Option<usize>,

    /// Per-request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Verify upstream TLS certificates. Defaults to false.
    #[serde(default)]
    pub verify_tls: Option<bool>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stdout when unset)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    CompiledDefaults::default().log_level.to_string()
}

/// Built-in values used when neither CLI, environment nor TOML provide one
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub data_root: PathBuf,
    pub schema: &'static str,
    pub host: &'static str,
    pub max_errors: usize,
    pub max_parallelism: usize,
    pub timeout_secs: u64,
    pub verify_tls: bool,
    pub log_level: &'static str,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("../data"),
            schema: "https",
            host: "www.sofascore.com",
            max_errors: 25,
            max_parallelism: 1,
            timeout_secs: 30,
            verify_tls: false,
            log_level: "info",
        }
    }
}

/// Load the bootstrap TOML file
///
/// An explicit path must exist and parse. Without one, `$SSP_CONFIG`, then
/// the per-user and system locations are tried; if none exists the defaults
/// are returned.
pub fn load_toml_config(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        return read_toml_config(path);
    }

    match locate_config_file() {
        Some(path) => read_toml_config(&path),
        None => {
            warn!("No config file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}

/// Parse a TOML config file
pub fn read_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read TOML {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
        warn!("{} points at missing file {}", CONFIG_PATH_ENV, path.display());
    }

    let user_config = dirs::config_dir().map(|d| d.join("sspuller").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/sspuller/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Resolve the data root following CLI → ENV → TOML → default priority
pub fn resolve_data_root(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml_config.data_root {
        return path.clone();
    }

    // Priority 4: compiled default
    CompiledDefaults::default().data_root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let config: TomlConfig = toml::from_str(
            r#"
            host = "localhost:8080"
            max_errors = 3

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.host.as_deref(), Some("localhost:8080"));
        assert_eq!(config.max_errors, Some(3));
        assert_eq!(config.verify_tls, None);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_defaults_keep_relaxed_tls() {
        assert!(!CompiledDefaults::default().verify_tls);
    }
}
