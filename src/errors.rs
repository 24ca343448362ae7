//! Error types for skhokho
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

use crate::domain::ValidationError;

/// Result type alias for skhokho operations
pub type Result<T> = std::result::Result<T, SkhokhoError>;

/// Main error type for all skhokho operations
#[derive(Debug, Error)]
pub enum SkhokhoError {
    /// Missing or rejected auth token - the user has to log in again
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// The remote API answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Client-side validation failed before any request was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Record not present in the local list or the API response
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl SkhokhoError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            SkhokhoError::NotAuthenticated(_) => "NOT_AUTHENTICATED",
            SkhokhoError::Api { .. } => "API_ERROR",
            SkhokhoError::Network(_) => "NETWORK_ERROR",
            SkhokhoError::Validation(e) => e.code(),
            SkhokhoError::NotFound(_) => "NOT_FOUND",
            SkhokhoError::InvalidJson(_) => "INVALID_JSON",
            SkhokhoError::FileNotFound(_) => "FILE_NOT_FOUND",
            SkhokhoError::ConfigError(_) => "CONFIG_ERROR",
            SkhokhoError::Io(_) => "IO_ERROR",
            SkhokhoError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        SkhokhoError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }

    /// Whether the user has to log in before retrying
    pub fn requires_login(&self) -> bool {
        matches!(self, SkhokhoError::NotAuthenticated(_))
    }
}

impl From<reqwest::Error> for SkhokhoError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            SkhokhoError::InvalidJson(error.to_string())
        } else {
            SkhokhoError::Network(error.to_string())
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &SkhokhoError) -> i32 {
    match error {
        SkhokhoError::NotAuthenticated(_) => 3,
        SkhokhoError::Validation(_) => 2,
        _ => 1,
    }
}
