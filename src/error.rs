//! Error types for the rate limiter.

use thiserror::Error;

/// Main error type for rate limiter operations.
#[derive(Error, Debug)]
pub enum LimiterError {
    /// Invalid limiter configuration (non-positive limit or window, bad settings file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request was checked against an empty key
    #[error("Invalid key: key cannot be empty")]
    InvalidKey,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rate limiter operations.
pub type Result<T> = std::result::Result<T, LimiterError>;
