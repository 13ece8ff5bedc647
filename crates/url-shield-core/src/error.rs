//! Error types for URL Shield
//!
//! Errors exist for configuration and engine plumbing only. Nothing in this
//! module ever crosses the public `analyze` boundary: analysis failures are
//! folded into an [`Assessment`](crate::Assessment) with an `Unknown`
//! verdict instead.

use thiserror::Error;

/// Result type alias for URL Shield operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for URL Shield operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (bad weights, inverted thresholds)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal errors (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::InvalidInput(_) => "invalid_input",
            Error::Serialization(_) => "serialization",
            Error::Internal(_) => "internal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("weights must sum to 1.0");
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_error_display() {
        let err = Error::invalid_input("URL is empty");
        let msg = format!("{}", err);
        assert!(msg.contains("URL is empty"));
    }
}
