//! JSON files in the config directory
//!
//! `config.json` is user-editable and written with default permissions.
//! `session.json` holds the auth token and is private to the user.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, SkhokhoError};
use crate::schemas::Config;

use super::paths::get_config_path;

/// Who may read a written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    /// Default permissions (umask)
    Shared,
    /// Owner read/write only on Unix
    Private,
}

/// Parse a JSON file into `T`.
///
/// A missing file is `FileNotFound` so callers can treat it as "not set".
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SkhokhoError::FileNotFound(path.display().to_string()))
        }
        Err(e) => return Err(SkhokhoError::Io(e)),
    };

    serde_json::from_str(&content)
        .map_err(|e| SkhokhoError::InvalidJson(format!("{}: {}", path.display(), e)))
}

/// Replace `path` with `data` as pretty JSON, readers never see a half-written file
pub fn write_json<T: Serialize>(path: &Path, data: &T, mode: FileMode) -> Result<()> {
    let mut content =
        serde_json::to_string_pretty(data).map_err(|e| SkhokhoError::InvalidJson(e.to_string()))?;
    content.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = path.with_extension("json.tmp");
    let mut file = open_for_write(&staging, mode)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&staging, path)?;
    Ok(())
}

#[cfg(unix)]
fn open_for_write(path: &Path, mode: FileMode) -> Result<fs::File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    if mode == FileMode::Private {
        options.mode(0o600);
    }
    let file = options.open(path)?;
    // A leftover staging file keeps its old mode; reset it
    if mode == FileMode::Private {
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    Ok(file)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path, _mode: FileMode) -> Result<fs::File> {
    Ok(OpenOptions::new().write(true).create(true).truncate(true).open(path)?)
}

/// Remove a file, treating an already-missing file as success.
///
/// Returns whether a file was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SkhokhoError::Io(e)),
    }
}

/// Read config.json from the config directory, or defaults if absent.
pub fn read_config(dir: &Path) -> Result<Config> {
    let path = get_config_path(dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), SkhokhoError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), SkhokhoError::InvalidJson(_)));
    }

    #[test]
    fn test_write_json_creates_parent_dirs_and_no_temp_left() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.json");

        write_json(&path, &Config::default(), FileMode::Shared).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let read: Config = read_json(&path).unwrap();
        assert_eq!(read, Config::default());
    }

    #[cfg(unix)]
    #[test]
    fn test_private_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.json");
        write_json(&path, &serde_json::json!({"token": "t"}), FileMode::Private).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_remove_file_if_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gone.json");
        fs::write(&path, "{}").unwrap();

        assert!(remove_file_if_exists(&path).unwrap());
        assert!(!remove_file_if_exists(&path).unwrap());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = read_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
