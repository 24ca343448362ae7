//! Configuration loading with defaults

use std::path::Path;

use tracing::debug;

use crate::errors::{Result, SkhokhoError};
use crate::fs;
use crate::schemas::Config;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "SKHOKHO_API_URL";

/// Load configuration, falling back to defaults.
///
/// If config.json exists in `dir` it is read and merged with defaults.
/// `SKHOKHO_API_URL` then overrides the API base, and `api_url` (from the
/// command line) overrides both.
///
/// # Arguments
/// * `dir` - The config directory
/// * `api_url` - Optional API base URL from the command line
pub fn load_config(dir: &Path, api_url: Option<&str>) -> Result<Config> {
    let config = fs::read_config(dir)?;
    let env_url = std::env::var(API_URL_ENV).ok();
    let config = apply_overrides(config, env_url.as_deref(), api_url)?;
    debug!(api_base = %config.api_base, "Loaded configuration");
    Ok(config)
}

fn apply_overrides(mut config: Config, env_url: Option<&str>, cli_url: Option<&str>) -> Result<Config> {
    if let Some(url) = cli_url.or(env_url).map(str::trim).filter(|u| !u.is_empty()) {
        config.api_base = url.to_string();
    }
    config.api_base = config.api_base.trim_end_matches('/').to_string();

    if !(config.api_base.starts_with("http://") || config.api_base.starts_with("https://")) {
        return Err(SkhokhoError::ConfigError(format!(
            "api_base must be an http(s) URL, got '{}'",
            config.api_base
        )));
    }
    if config.page_size == 0 {
        return Err(SkhokhoError::ConfigError("page_size must be at least 1".to_string()));
    }
    Ok(config)
}
