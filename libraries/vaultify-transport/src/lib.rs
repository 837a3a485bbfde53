//! Vaultify Transport
//!
//! The controls a listener touches: a compact mini player and an expanded
//! full player. Both read engine state and forward commands to the
//! [`PlaybackEngine`](vaultify_playback::PlaybackEngine); the only state
//! kept here is gesture tracking and a snapshot of what is playing.
//!
//! # Example
//!
//! ```rust
//! use vaultify_core::Track;
//! use vaultify_playback::{NullOutput, PlaybackConfig, PlaybackEngine};
//! use vaultify_storage::Ledger;
//! use vaultify_transport::{format_time, TransportSurface};
//!
//! let mut engine = PlaybackEngine::new(NullOutput::new(), PlaybackConfig::default());
//! let mut ledger = Ledger::new();
//! let mut surface = TransportSurface::new();
//!
//! engine.play_track(Track::new("a.mp3", "https://cdn.example/a.mp3"));
//! surface.sync(&mut engine, &mut ledger);
//!
//! assert!(surface.mini_player().is_visible());
//! assert_eq!(ledger.recently_played().len(), 1);
//! assert_eq!(format_time(75.0), "1:15");
//! ```

mod format;
mod full;
mod mini;
mod surface;

pub use format::format_time;
pub use full::{queue_label, seek_target, FullPlayer, QueueDrag};
pub use mini::{MiniPlayer, SwipeTracker, SWIPE_THRESHOLD_PX};
pub use surface::{NowPlaying, TransportSurface};
