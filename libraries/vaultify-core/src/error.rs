/// Core error types for Vaultify
use thiserror::Error;

/// Result type alias using `VaultifyError`
pub type Result<T> = std::result::Result<T, VaultifyError>;

/// Core error type for Vaultify
#[derive(Error, Debug)]
pub enum VaultifyError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error talking to the HTTP collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl VaultifyError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = VaultifyError::not_found("Playlist", "genre-rock");
        assert_eq!(err.to_string(), "Playlist not found: genre-rock");
    }

    #[test]
    fn serde_errors_convert() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("nope");
        let err: VaultifyError = parse.unwrap_err().into();
        assert!(matches!(err, VaultifyError::Serialization(_)));
    }
}
