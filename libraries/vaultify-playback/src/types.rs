//! Core types for playback management

use serde::{Deserialize, Serialize};

/// Playback state
///
/// Derived from the bound track and the transport flag; the engine never
/// stores it separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track bound
    Idle,

    /// Track bound, not playing
    Paused,

    /// Track bound and playing (or waiting for the output to become ready)
    Playing,
}

/// Why the current track changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackChangeReason {
    /// Explicit `play_track` call
    Selected,

    /// Taken from the explicit queue
    Queue,

    /// Same-album continuation after the queue ran dry
    Album,

    /// Random pick from the whole catalog
    Library,

    /// Popped from history by "previous"
    History,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Maximum history entries kept for "previous"
    pub history_size: usize,

    /// Initial volume (0-100)
    pub volume: u8,

    /// Initial loop flag
    pub looping: bool,

    /// Initial shuffle flag
    pub shuffling: bool,

    /// "Previous" restarts the current track once playback is past this point
    pub restart_threshold_secs: f64,

    /// Resume a paused track when the user seeks inside it
    pub resume_on_seek: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: 500,
            volume: 70,
            looping: false,
            shuffling: false,
            restart_threshold_secs: 3.0,
            resume_on_seek: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 70);
        assert_eq!(config.history_size, 500);
        assert!(!config.looping);
        assert!(!config.shuffling);
        assert_eq!(config.restart_threshold_secs, 3.0);
        assert!(!config.resume_on_seek);
    }

    #[test]
    fn state_serializes_by_name() {
        let json = serde_json::to_string(&PlaybackState::Paused).unwrap();
        assert_eq!(json, "\"Paused\"");
    }
}
