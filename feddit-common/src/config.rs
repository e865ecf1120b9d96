//! Bootstrap configuration loading and config file discovery
//!
//! The TOML file is optional. Every field has a compiled default (or is
//! left unset for values that must come from somewhere else, such as the
//! Hugging Face API key). Resolution priority between CLI, environment and
//! TOML is done by the consuming binary; this module only loads the file.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "feddit-analyzer";

/// Config file name inside [`APP_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Interface to bind the HTTP server on
    pub host: Option<String>,

    /// HTTP server port
    pub port: Option<u16>,

    /// Base URL of the Feddit API (e.g. `http://localhost:8080`)
    pub feddit_api_base_url: Option<String>,

    /// Hugging Face inference API key
    pub huggingface_api_key: Option<String>,

    /// Override for the sentiment model inference URL
    pub model_api_url: Option<String>,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Comment retrieval tuning
    pub comments: PagingConfig,

    /// Subfeddit search tuning
    pub subfeddits: PagingConfig,

    /// Title cache bounds
    pub cache: CacheConfig,

    /// Collaborator request timeouts
    pub timeouts: TimeoutConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Page size used when walking a paginated Feddit listing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    pub page_size: Option<usize>,
}

/// Bounds of the title → id cache
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: Option<u64>,
    pub ttl_secs: Option<u64>,
}

/// Per-request timeouts in seconds
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub feddit_secs: Option<u64>,
    pub model_secs: Option<u64>,
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML failed ({}): {}", path.display(), e)))
}

/// Platform default config file location
///
/// `~/.config/feddit-analyzer/config.toml` on Linux, the equivalent
/// application config directory elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration, degrading to defaults when no file is available
///
/// An explicitly requested file must exist and parse. The platform default
/// file is optional: if it is missing a warning is logged and defaults are
/// used. A default file that exists but fails to parse is still an error.
pub fn load_or_default(explicit: Option<&Path>) -> Result<TomlConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        info!("Loading configuration from {}", path.display());
        return load_toml_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            info!("Loading configuration from {}", path.display());
            load_toml_config(&path)
        }
        Some(path) => {
            warn!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            Ok(TomlConfig::default())
        }
        None => {
            warn!("Could not determine config directory, using defaults and environment");
            Ok(TomlConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: TomlConfig = toml::from_str("").unwrap();
        assert!(config.port.is_none());
        assert!(config.feddit_api_base_url.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.cache.max_entries.is_none());
    }

    #[test]
    fn test_nested_sections_parse() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 9000
            feddit_api_base_url = "http://localhost:8080"

            [logging]
            level = "debug"

            [comments]
            page_size = 1000

            [cache]
            max_entries = 10
            ttl_secs = 5

            [timeouts]
            model_secs = 15
            "#,
        )
        .unwrap();

        assert_eq!(config.port, Some(9000));
        assert_eq!(
            config.feddit_api_base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.comments.page_size, Some(1000));
        assert!(config.subfeddits.page_size.is_none());
        assert_eq!(config.cache.max_entries, Some(10));
        assert_eq!(config.cache.ttl_secs, Some(5));
        assert_eq!(config.timeouts.model_secs, Some(15));
        assert!(config.timeouts.feddit_secs.is_none());
    }

    #[test]
    fn test_default_path_ends_with_app_dir() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(Path::new(APP_DIR_NAME).join(CONFIG_FILE_NAME)));
        }
    }
}
