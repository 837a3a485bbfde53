//! Vaultify - Playback Engine
//!
//! Platform-agnostic playback management for Vaultify.
//!
//! This crate provides:
//! - A single-owner engine around one media output
//! - Explicit FIFO queue (random pick when shuffling)
//! - History stack for "previous"
//! - Auto-continuation: same album, then the whole catalog
//! - Loop, shuffle, volume and mute
//! - Cancellation of stale output notifications
//!
//! # Architecture
//!
//! `vaultify-playback` knows nothing about HTTP, storage or UI. The media
//! output is supplied through the [`MediaOutput`] trait and talks back via
//! [`OutputEvent`]s; the UI learns about changes from
//! [`PlaybackEngine::drain_events`].
//!
//! # Example
//!
//! ```rust
//! use vaultify_core::Track;
//! use vaultify_playback::{NullOutput, OutputEvent, PlaybackConfig, PlaybackEngine, PlaybackState};
//!
//! let mut engine = PlaybackEngine::new(NullOutput::new(), PlaybackConfig::default());
//!
//! engine.play_track(Track::new("intro.mp3", "https://cdn.example/intro.mp3"));
//! engine.add_to_queue(Track::new("verse.mp3", "https://cdn.example/verse.mp3"));
//!
//! // The output reports back asynchronously
//! let token = engine.load_token();
//! engine.handle_output_event(token, OutputEvent::Ready);
//! engine.handle_output_event(token, OutputEvent::MetadataLoaded { duration_secs: 180.0 });
//! assert!(engine.seek(90.0));
//!
//! // Natural end advances through the queue
//! engine.handle_output_event(token, OutputEvent::Ended);
//! assert_eq!(engine.current_track().unwrap().file_name, "verse.mp3");
//! assert_eq!(engine.state(), PlaybackState::Playing);
//!
//! for event in engine.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

mod continuation;
mod engine;
mod error;
pub mod events;
mod history;
mod output;
mod queue;
pub mod types;
mod volume;

// Public exports
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{LoadToken, MediaOutput, NullOutput, OutputEvent};
pub use types::{PlaybackConfig, PlaybackState, TrackChangeReason};
