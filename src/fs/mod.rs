//! File system utilities for skhokho
//!
//! Provides config-directory resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, remove_file_if_exists, write_json, FileMode};
pub use paths::{get_config_path, get_session_path, resolve_config_dir, HOME_ENV};
