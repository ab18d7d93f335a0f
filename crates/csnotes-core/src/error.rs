//! Error types for csnotes-core

use thiserror::Error;

/// Result type alias using csnotes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in csnotes-core operations
///
/// Server-side rejections (`errors`/`fields` in a response body) are not
/// errors: they are classified into [`crate::api::ApiResponse`]. This type
/// only covers requests that never produced a readable response.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (timeout, connection refused, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Non-success HTTP status without a JSON body
    #[error("Unexpected HTTP {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Login was rejected or malformed
    #[error("Login failed: {0}")]
    Login(String),

    /// Signup was rejected or malformed
    #[error("Registration failed: {0}")]
    Registration(String),

    /// Token persistence error
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}
