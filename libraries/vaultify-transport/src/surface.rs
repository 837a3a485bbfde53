//! Transport surface
//!
//! Folds engine events into a [`NowPlaying`] snapshot and turns gestures
//! into engine commands. Every track change is also recorded in the
//! ledger's recently played list.

use crate::full::{seek_target, FullPlayer, QueueDrag};
use crate::mini::{MiniPlayer, SwipeTracker};
use serde::Serialize;
use tracing::{debug, warn};
use vaultify_core::Track;
use vaultify_playback::{MediaOutput, PlaybackEngine, PlaybackEvent, PlaybackState};
use vaultify_storage::Ledger;

/// What the transport controls currently show
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NowPlaying {
    pub track: Option<Track>,
    pub is_playing: bool,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub looping: bool,
    pub shuffling: bool,
    pub volume: u8,
    pub is_muted: bool,
    /// Full player open
    pub expanded: bool,
    pub queue: Vec<Track>,
    /// Last transport failure, cleared by the next track change
    pub last_error: Option<String>,
}

/// Mini and full player controls over one engine
#[derive(Debug, Default)]
pub struct TransportSurface {
    now_playing: NowPlaying,
    swipe: SwipeTracker,
    drag: QueueDrag,
}

impl TransportSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose snapshot starts from the engine's current state
    pub fn attach<O: MediaOutput>(engine: &PlaybackEngine<O>) -> Self {
        let mut surface = Self::new();
        surface.refresh(engine);
        surface
    }

    pub fn now_playing(&self) -> &NowPlaying {
        &self.now_playing
    }

    pub fn mini_player(&self) -> MiniPlayer<'_> {
        MiniPlayer::new(&self.now_playing)
    }

    pub fn full_player(&self) -> FullPlayer<'_> {
        FullPlayer::new(&self.now_playing)
    }

    /// Drain pending engine events into the snapshot
    ///
    /// Returns the drained events so other listeners can see them too.
    pub fn sync<O: MediaOutput>(
        &mut self,
        engine: &mut PlaybackEngine<O>,
        ledger: &mut Ledger,
    ) -> Vec<PlaybackEvent> {
        let events = engine.drain_events();
        for event in &events {
            self.apply(event, engine, ledger);
        }
        events
    }

    fn apply<O: MediaOutput>(
        &mut self,
        event: &PlaybackEvent,
        engine: &PlaybackEngine<O>,
        ledger: &mut Ledger,
    ) {
        let now = &mut self.now_playing;
        match event {
            PlaybackEvent::StateChanged { state } => {
                now.is_playing = *state == PlaybackState::Playing;
            }
            PlaybackEvent::TrackChanged { track, .. } => {
                debug!(file_name = %track.file_name, "Now playing");
                ledger.record_play(track);
                now.track = Some(track.clone());
                now.last_error = None;
            }
            PlaybackEvent::TrackFinished { .. } => {}
            PlaybackEvent::PositionUpdate {
                position_secs,
                duration_secs,
            } => {
                now.position_secs = *position_secs;
                now.duration_secs = *duration_secs;
            }
            PlaybackEvent::ModesChanged { looping, shuffling } => {
                now.looping = *looping;
                now.shuffling = *shuffling;
            }
            PlaybackEvent::VolumeChanged { level, is_muted } => {
                now.volume = *level;
                now.is_muted = *is_muted;
            }
            PlaybackEvent::QueueChanged { .. } => {
                now.queue = engine.queue().into_iter().cloned().collect();
            }
            PlaybackEvent::ExpandedViewChanged { visible } => {
                now.expanded = *visible;
            }
            PlaybackEvent::Error { message } => {
                warn!(message = %message, "Playback error");
                now.last_error = Some(message.clone());
            }
        }
    }

    /// Copy every field from the engine, ignoring pending events
    ///
    /// Used once when a surface attaches to an engine that is already
    /// running.
    pub fn refresh<O: MediaOutput>(&mut self, engine: &PlaybackEngine<O>) {
        self.now_playing = NowPlaying {
            track: engine.current_track().cloned(),
            is_playing: engine.is_playing(),
            position_secs: engine.position_secs(),
            duration_secs: engine.duration_secs(),
            looping: engine.is_looping(),
            shuffling: engine.is_shuffling(),
            volume: engine.volume(),
            is_muted: engine.is_muted(),
            expanded: engine.is_expanded_view_visible(),
            queue: engine.queue().into_iter().cloned().collect(),
            last_error: self.now_playing.last_error.take(),
        };
    }

    // ===== Mini player gestures =====

    /// Tap on the mini player opens or closes the full player
    pub fn tap_mini<O: MediaOutput>(&mut self, engine: &mut PlaybackEngine<O>) {
        if self.mini_player().is_visible() {
            engine.toggle_expanded_view();
        }
    }

    pub fn touch_start(&mut self, y: f64) {
        self.swipe.touch_start(y);
    }

    /// Returns true when the move completed a swipe and toggled the view
    pub fn touch_move<O: MediaOutput>(&mut self, y: f64, engine: &mut PlaybackEngine<O>) -> bool {
        if self.swipe.touch_move(y) {
            engine.toggle_expanded_view();
            return true;
        }
        false
    }

    pub fn touch_end(&mut self) {
        self.swipe.touch_end();
    }

    // ===== Full player controls =====

    /// Click on the seek bar at `offset` of `width`
    ///
    /// Returns whether the engine accepted the seek.
    pub fn click_seek_bar<O: MediaOutput>(
        &mut self,
        offset: f64,
        width: f64,
        engine: &mut PlaybackEngine<O>,
    ) -> bool {
        match seek_target(offset, width, self.now_playing.duration_secs) {
            Some(target) => engine.seek(target),
            None => false,
        }
    }

    /// Heart button; returns the new membership, or `None` with no track
    pub fn toggle_favorite(&self, ledger: &mut Ledger) -> Option<bool> {
        let track = self.now_playing.track.as_ref()?;
        Some(ledger.toggle_favorite(track))
    }

    pub fn start_queue_drag(&mut self, from: usize) {
        self.drag.start(from);
    }

    pub fn cancel_queue_drag(&mut self) {
        self.drag.cancel();
    }

    /// Drop the dragged queue entry at `to`
    ///
    /// Returns whether the engine accepted the new order.
    pub fn drop_queue_item<O: MediaOutput>(
        &mut self,
        to: usize,
        engine: &mut PlaybackEngine<O>,
    ) -> bool {
        match self.drag.drop_at(to, &self.now_playing.queue) {
            Some(order) => engine.reorder_queue(order),
            None => false,
        }
    }
}
