//! Media output abstraction
//!
//! The engine drives exactly one media output: something that can stream a
//! URL, start, pause, jump and change volume. Decoding happens behind this
//! trait (an HTML media element, a native player, a test double).

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifies one `load` call on the output
///
/// Every load gets a fresh token, so notifications produced by an earlier
/// source can be recognised and dropped after the engine has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LoadToken(u64);

impl LoadToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Asynchronous notifications from the media output
///
/// Delivered back to the engine through
/// `PlaybackEngine::handle_output_event` together with the token of the
/// load they belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputEvent {
    /// Enough data buffered to start playing
    Ready,

    /// Duration became known
    MetadataLoaded { duration_secs: f64 },

    /// Periodic position report
    TimeUpdate { position_secs: f64 },

    /// Source played through to its end
    Ended,

    /// Source failed to load or decode
    Failed { message: String },
}

/// Platform media output
///
/// Commands are fire-and-forget: `load` only starts fetching, readiness and
/// metadata arrive later as [`OutputEvent`]s.
pub trait MediaOutput: Send {
    /// Replace the current source
    ///
    /// Must stop delivering notifications for the previous source, or tag
    /// them with the previous token so the engine can drop them.
    fn load(&mut self, url: &str, token: LoadToken) -> Result<()>;

    /// Start or resume the current source
    fn play(&mut self) -> Result<()>;

    /// Pause the current source, keeping its position
    fn pause(&mut self) -> Result<()>;

    /// Jump to a position in seconds
    fn seek(&mut self, position_secs: f64) -> Result<()>;

    /// Set linear output gain (0.0 - 1.0)
    fn set_volume(&mut self, gain: f32) -> Result<()>;
}

/// Output that accepts every command and produces no sound
///
/// Used by headless sessions that only need the engine's bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct NullOutput {
    url: Option<String>,
    playing: bool,
}

impl NullOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// URL of the last loaded source
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl MediaOutput for NullOutput {
    fn load(&mut self, url: &str, _token: LoadToken) -> Result<()> {
        self.url = Some(url.to_string());
        self.playing = false;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.playing = self.url.is_some();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, _position_secs: f64) -> Result<()> {
        Ok(())
    }

    fn set_volume(&mut self, _gain: f32) -> Result<()> {
        Ok(())
    }
}
