//! Compact player
//!
//! A small round control showing progress around the cover. Tapping it
//! opens the full player; so does swiping up on touch screens.

use crate::surface::NowPlaying;

/// Upward travel that counts as a swipe
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Tracks one touch gesture at a time
///
/// A gesture fires at most once: after the swipe is recognized the rest of
/// the movement is ignored until the next touch starts.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start_y: Option<f64>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_start(&mut self, y: f64) {
        self.start_y = Some(y);
    }

    /// Returns true when this move completes an upward swipe
    pub fn touch_move(&mut self, y: f64) -> bool {
        let Some(start_y) = self.start_y else {
            return false;
        };
        if start_y - y > SWIPE_THRESHOLD_PX {
            self.start_y = None;
            return true;
        }
        false
    }

    pub fn touch_end(&mut self) {
        self.start_y = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start_y.is_some()
    }
}

/// Read-only view of the compact player
#[derive(Debug, Clone, Copy)]
pub struct MiniPlayer<'a> {
    now_playing: &'a NowPlaying,
}

impl<'a> MiniPlayer<'a> {
    pub(crate) fn new(now_playing: &'a NowPlaying) -> Self {
        Self { now_playing }
    }

    /// Shown whenever a track is bound
    pub fn is_visible(&self) -> bool {
        self.now_playing.track.is_some()
    }

    /// Progress in percent, 0 while the duration is unknown
    pub fn progress_percent(&self) -> f64 {
        let duration_secs = self.now_playing.duration_secs;
        if duration_secs > 0.0 {
            self.now_playing.position_secs / duration_secs * 100.0
        } else {
            0.0
        }
    }

    pub fn is_playing(&self) -> bool {
        self.now_playing.is_playing
    }

    pub fn cover_url(&self) -> Option<&'a str> {
        self.now_playing
            .track
            .as_ref()
            .and_then(|t| t.cover_url.as_deref())
    }

    /// Hover caption: the track title
    pub fn caption(&self) -> Option<&'a str> {
        self.now_playing.track.as_ref().map(|t| t.display_title())
    }
}
