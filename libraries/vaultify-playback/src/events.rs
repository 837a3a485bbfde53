//! Playback Events
//!
//! Event-based communication for UI synchronization. The engine queues
//! events as its state changes and hands them out through
//! `PlaybackEngine::drain_events`:
//! - State changes (play/pause/stop)
//! - Track changes, with the reason the track was picked
//! - Position and duration updates
//! - Queue, volume, mode and view changes

use crate::types::{PlaybackState, TrackChangeReason};
use serde::{Deserialize, Serialize};
use vaultify_core::Track;

/// Events emitted by the playback engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// A new track was bound to the output
    TrackChanged {
        /// The new (current) track
        track: Track,
        /// File name of the track it replaced, if any
        previous_file_name: Option<String>,
        /// How the track was picked
        reason: TrackChangeReason,
    },

    /// Track reached its natural end
    TrackFinished {
        /// File name of the finished track
        file_name: String,
    },

    /// Position or duration moved
    PositionUpdate {
        /// Current playback position in seconds
        position_secs: f64,
        /// Track duration in seconds (0 until known)
        duration_secs: f64,
    },

    /// Loop or shuffle flag changed
    ModesChanged { looping: bool, shuffling: bool },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Queue changed (tracks added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Expanded player shown or hidden
    ExpandedViewChanged { visible: bool },

    /// The media output failed; playback stopped
    Error {
        /// Error message
        message: String,
    },
}
