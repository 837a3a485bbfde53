//! Error types for the Vaultify server client.

use thiserror::Error;
use vaultify_core::VaultifyError;

/// Errors that can occur when talking to the Vaultify backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for VaultifyError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::InvalidUrl(msg) => VaultifyError::InvalidInput(msg),
            ServerClientError::ParseError(msg) => VaultifyError::Other(msg),
            other => VaultifyError::Network(other.to_string()),
        }
    }
}
