//! Error handling module for the cmkt CLI.
//!
//! Typed errors for configuration and output. Commands add file
//! context with `anyhow` on top of these.

use thiserror::Error;

/// Main error type for the cmkt CLI application.
#[derive(Error, Debug)]
pub enum CmktError {
    /// Error when the configuration cannot be found or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using CmktError.
pub type Result<T> = std::result::Result<T, CmktError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CmktError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CmktError = json_err.into();
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CmktError = io_err.into();
        assert!(matches!(err, CmktError::Io(_)));
    }
}
