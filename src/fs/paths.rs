//! Path resolution utilities for skhokho
//!
//! Locates the directory holding `config.json` and `session.json`.

use std::path::{Path, PathBuf};

use crate::errors::{Result, SkhokhoError};

/// Environment variable overriding the config directory
pub const HOME_ENV: &str = "SKHOKHO_HOME";

/// Name of the config directory under the user's home
const DIR_NAME: &str = ".skhokho";

/// Resolve the config directory.
///
/// Order: explicit override, then `SKHOKHO_HOME`, then `.skhokho` under the
/// user's home directory.
///
/// # Errors
/// * `ConfigError` - If none of the three is available
pub fn resolve_config_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    resolve_config_dir_from(
        override_dir,
        std::env::var_os(HOME_ENV).map(PathBuf::from),
        dirs::home_dir(),
    )
}

fn resolve_config_dir_from(
    override_dir: Option<&Path>,
    skhokho_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = skhokho_home.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    home.filter(|h| !h.as_os_str().is_empty())
        .map(|h| h.join(DIR_NAME))
        .ok_or_else(|| {
            SkhokhoError::ConfigError(format!(
                "Cannot locate config directory: no home directory found; set {} or pass --config-dir",
                HOME_ENV
            ))
        })
}

/// Get the path to the config.json file.
pub fn get_config_path(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

/// Get the path to the session.json file.
pub fn get_session_path(dir: &Path) -> PathBuf {
    dir.join("session.json")
}
