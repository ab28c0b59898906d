//! Error types for pushline

use thiserror::Error;

/// Main error type for the pushline library
#[derive(Error, Debug)]
pub enum Error {
    /// Operation invoked before `initialize`
    #[error("pushline is not initialized")]
    Uninitialized,

    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Token acquisition error
    #[error("token error: {0}")]
    Token(String),

    /// HTTP transport error
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// API rejected the request
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Error message from the response body
        message: String,
    },
}

/// Result type alias for pushline
pub type Result<T> = std::result::Result<T, Error>;
