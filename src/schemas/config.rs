//! Config schema - Configuration for skhokho

use serde::{Deserialize, Serialize};

/// Main configuration for skhokho
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the API, including the `/api` prefix
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Rows shown per page in list views
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_base() -> String {
    "http://127.0.0.1:8000/api".to_string()
}

fn default_page_size() -> usize {
    10
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base: default_api_base(),
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base, "http://127.0.0.1:8000/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_partial_json() {
        let json = r#"{"api_base": "https://crm.example.test/api"}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.api_base, "https://crm.example.test/api");
        assert_eq!(parsed.page_size, 10);
        assert_eq!(parsed.timeout_seconds, 30);
    }

    #[test]
    fn test_legacy_schema_version_is_ignored() {
        let json = r#"{"schema_version": 1, "page_size": 25}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.page_size, 25);
    }
}
