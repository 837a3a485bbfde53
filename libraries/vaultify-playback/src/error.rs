//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Raised by media output implementations. The engine itself converts them
/// into events and never returns them from its command methods.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The output could not open the source
    #[error("Failed to load source: {0}")]
    Load(String),

    /// The output refused to start or resume
    #[error("Failed to start playback: {0}")]
    Play(String),

    /// The output could not jump to the requested position
    #[error("Seek failed at {position_secs}s: {message}")]
    Seek { position_secs: f64, message: String },

    /// Any other output failure
    #[error("Media output error: {0}")]
    Output(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
