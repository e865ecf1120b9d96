//! Configuration resolution for feddit-analyzer
//!
//! Priority for every setting: CLI flag → environment variable → TOML file
//! → compiled default. CLI flags and their environment fallbacks are merged
//! by clap before reaching [`resolve_config`]; the Hugging Face API key has
//! no CLI flag and is resolved here from the environment or TOML.

use std::time::Duration;

use feddit_common::config::TomlConfig;
use feddit_common::{Error, Result};
use tracing::{info, warn};

use crate::services::comment_analyzer::{DEFAULT_COMMENT_PAGE_SIZE, DEFAULT_MODEL_TIMEOUT};
use crate::services::feddit_client;
use crate::services::sentiment_client::DEFAULT_MODEL_API_URL;
use crate::services::title_resolver::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL, DEFAULT_SUBFEDDIT_PAGE_SIZE,
};

/// Environment variable holding the Hugging Face API key
pub const HUGGINGFACE_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;

/// Values given on the command line (or their clap `env` fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub feddit_api_base_url: Option<String>,
}

/// Fully resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub host: String,
    pub port: u16,
    pub feddit_api_base_url: String,
    pub huggingface_api_key: String,
    pub model_api_url: String,
    pub comment_page_size: usize,
    pub subfeddit_page_size: usize,
    pub cache_max_entries: u64,
    pub cache_ttl: Duration,
    pub feddit_timeout: Duration,
    pub model_timeout: Duration,
}

impl AnalyzerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Merge CLI, environment and TOML into a runtime configuration
pub fn resolve_config(cli: &CliOverrides, toml: &TomlConfig) -> Result<AnalyzerConfig> {
    let feddit_api_base_url = cli
        .feddit_api_base_url
        .clone()
        .or_else(|| toml.feddit_api_base_url.clone())
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            Error::Config(
                "Feddit API base URL not configured. Use --feddit-url, \
                 FEDDIT_API_BASE_URL or feddit_api_base_url in the TOML config"
                    .to_string(),
            )
        })?;

    let config = AnalyzerConfig {
        host: cli
            .host
            .clone()
            .or_else(|| toml.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: cli.port.or(toml.port).unwrap_or(DEFAULT_PORT),
        feddit_api_base_url,
        huggingface_api_key: resolve_huggingface_api_key(toml)?,
        model_api_url: toml
            .model_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_MODEL_API_URL.to_string()),
        comment_page_size: positive(
            "comments.page_size",
            toml.comments.page_size.unwrap_or(DEFAULT_COMMENT_PAGE_SIZE),
        )?,
        subfeddit_page_size: positive(
            "subfeddits.page_size",
            toml.subfeddits.page_size.unwrap_or(DEFAULT_SUBFEDDIT_PAGE_SIZE),
        )?,
        cache_max_entries: positive(
            "cache.max_entries",
            toml.cache.max_entries.unwrap_or(DEFAULT_CACHE_MAX_ENTRIES),
        )?,
        cache_ttl: toml
            .cache
            .ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_CACHE_TTL),
        feddit_timeout: toml
            .timeouts
            .feddit_secs
            .map(Duration::from_secs)
            .unwrap_or(feddit_client::DEFAULT_TIMEOUT),
        model_timeout: toml
            .timeouts
            .model_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_MODEL_TIMEOUT),
    };

    Ok(config)
}

/// Resolve the default log filter
///
/// **Priority:** CLI → TOML → "info" (TOML default). `RUST_LOG` still
/// overrides the result when the subscriber is built.
pub fn resolve_log_level(cli_level: Option<&str>, toml: &TomlConfig) -> String {
    cli_level
        .filter(|level| !level.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| toml.logging.level.clone())
}

/// Resolve the Hugging Face API key
///
/// **Priority:** ENV → TOML
pub fn resolve_huggingface_api_key(toml: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(HUGGINGFACE_API_KEY_ENV)
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = toml
        .huggingface_api_key
        .clone()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Hugging Face API key found in environment and TOML. Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("Hugging Face API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Hugging Face API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(format!(
        "Hugging Face API key not configured. Set {} or huggingface_api_key in the TOML config",
        HUGGINGFACE_API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

fn positive<T: PartialOrd + Default + std::fmt::Display>(name: &str, value: T) -> Result<T> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(Error::InvalidInput(format!(
            "{} must be greater than zero (got {})",
            name, value
        )))
    }
}
