//! Playback engine
//!
//! Owns the media output, the bound track, the transport flags, the queue
//! and the history, and decides what plays next.

use crate::{
    continuation,
    events::PlaybackEvent,
    history::History,
    output::{LoadToken, MediaOutput, OutputEvent},
    queue::Queue,
    types::{PlaybackConfig, PlaybackState, TrackChangeReason},
    volume::Volume,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};
use vaultify_core::Track;

/// Playback engine
///
/// Single owner of one [`MediaOutput`]. Every command is synchronous with
/// respect to the observable state; the output reports back through
/// [`PlaybackEngine::handle_output_event`].
///
/// Commands never fail. Requests that make no sense in the current state
/// (seeking before the duration is known, toggling with nothing bound) are
/// ignored, and output failures turn into "not playing" plus an
/// [`PlaybackEvent::Error`].
pub struct PlaybackEngine<O: MediaOutput> {
    output: O,
    config: PlaybackConfig,

    // State
    current_track: Option<Track>,
    is_playing: bool,
    position_secs: f64,
    duration_secs: f64,
    duration_known: bool,

    // Modes
    looping: bool,
    shuffling: bool,
    expanded_view: bool,
    volume: Volume,

    // Queue, history and continuation pool
    queue: Queue,
    history: History,
    catalog: Vec<Track>,

    // Pending load bookkeeping
    load_token: LoadToken,
    awaiting_ready: bool,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: MediaOutput> PlaybackEngine<O> {
    /// Create a new engine around `output`
    pub fn new(output: O, config: PlaybackConfig) -> Self {
        Self::with_rng(output, config, StdRng::from_entropy())
    }

    /// Create an engine whose random picks are reproducible
    pub fn with_seed(output: O, config: PlaybackConfig, seed: u64) -> Self {
        Self::with_rng(output, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(output: O, config: PlaybackConfig, rng: StdRng) -> Self {
        Self {
            output,
            current_track: None,
            is_playing: false,
            position_secs: 0.0,
            duration_secs: 0.0,
            duration_known: false,
            looping: config.looping,
            shuffling: config.shuffling,
            expanded_view: false,
            volume: Volume::new(config.volume),
            queue: Queue::new(),
            history: History::new(config.history_size),
            catalog: Vec::new(),
            load_token: LoadToken::default(),
            awaiting_ready: false,
            rng,
            pending_events: Vec::new(),
            config,
        }
    }

    // ===== Playback Control =====

    /// Bind `track` and start playing it from the beginning
    ///
    /// The previously bound track (if any) goes onto the history, even when
    /// it is the same track. Tracks without a URL are ignored.
    pub fn play_track(&mut self, track: Track) {
        if track.signed_url.trim().is_empty() {
            warn!(file_name = %track.file_name, "Ignoring track without a playable URL");
            return;
        }
        self.advance_to(track, TrackChangeReason::Selected);
    }

    /// Flip between playing and paused
    ///
    /// Does nothing when no track is bound. Position, queue and history are
    /// left alone.
    pub fn toggle_playback(&mut self) {
        if self.current_track.is_none() {
            debug!("Toggle ignored, no track bound");
            return;
        }

        self.is_playing = !self.is_playing;
        if self.is_playing {
            // A pending load starts playing on its own once ready
            if !self.awaiting_ready {
                if let Err(e) = self.output.play() {
                    self.fail_transport(e.to_string());
                    return;
                }
            }
        } else if let Err(e) = self.output.pause() {
            warn!(error = %e, "Output failed to pause");
        }
        self.emit_state_changed();
    }

    /// Jump to `target_secs` in the current track
    ///
    /// Accepted only when a track is bound, its duration is known and
    /// `0 <= target_secs <= duration`. Returns whether the seek was applied.
    pub fn seek(&mut self, target_secs: f64) -> bool {
        if self.current_track.is_none() || !self.duration_known {
            debug!(target_secs, "Seek ignored, duration unknown");
            return false;
        }
        if !(0.0..=self.duration_secs).contains(&target_secs) {
            debug!(target_secs, duration_secs = self.duration_secs, "Seek out of range");
            return false;
        }

        if let Err(e) = self.output.seek(target_secs) {
            warn!(error = %e, "Output failed to seek");
            self.emit_error(e.to_string());
            return false;
        }

        self.position_secs = target_secs;
        self.emit_position();

        if self.config.resume_on_seek && !self.is_playing && target_secs < self.duration_secs {
            self.toggle_playback();
        }
        true
    }

    /// Skip forward
    ///
    /// Queue first (random entry when shuffling), then a random track from
    /// the current album, then a random track from the catalog. With
    /// nothing left, playback stops and the track stays bound.
    pub fn play_next(&mut self) {
        if let Some(track) = self.take_from_queue() {
            self.advance_to(track, TrackChangeReason::Queue);
            return;
        }

        if let Some(current) = self.current_track.as_ref() {
            if let Some(track) = continuation::pick_same_album(&self.catalog, current, &mut self.rng)
            {
                self.advance_to(track, TrackChangeReason::Album);
                return;
            }
        }

        if let Some(track) = continuation::pick_any(&self.catalog, &mut self.rng) {
            self.advance_to(track, TrackChangeReason::Library);
            return;
        }

        debug!("Nothing left to play");
        self.halt();
    }

    /// Skip backward
    ///
    /// Past the restart threshold this rewinds the current track. Otherwise
    /// the last history entry becomes current and the current track is put
    /// back at the head of the queue. With empty history a random catalog
    /// track plays instead.
    pub fn play_previous(&mut self) {
        if self.current_track.is_some() && self.position_secs > self.config.restart_threshold_secs
        {
            self.restart_current();
            return;
        }

        if let Some(previous) = self.history.pop() {
            if let Some(current) = self.current_track.clone() {
                self.queue.push_front(current);
                self.emit_queue_changed();
            }
            self.load(previous, TrackChangeReason::History);
            return;
        }

        if let Some(track) = continuation::pick_any(&self.catalog, &mut self.rng) {
            self.advance_to(track, TrackChangeReason::Library);
            return;
        }

        debug!("Previous ignored, nothing to go back to");
    }

    // ===== Output notifications =====

    /// Apply a notification from the media output
    ///
    /// Notifications carrying a token other than the one from the latest
    /// load belong to a replaced source and are dropped.
    pub fn handle_output_event(&mut self, token: LoadToken, event: OutputEvent) {
        if token != self.load_token || self.current_track.is_none() {
            debug!(
                token = token.value(),
                current = self.load_token.value(),
                "Dropping notification from stale source"
            );
            return;
        }

        match event {
            OutputEvent::Ready => {
                self.awaiting_ready = false;
                if self.is_playing {
                    if let Err(e) = self.output.play() {
                        self.fail_transport(e.to_string());
                    }
                }
            }
            OutputEvent::MetadataLoaded { duration_secs } => {
                if !duration_secs.is_finite() || duration_secs < 0.0 {
                    warn!(duration_secs, "Ignoring invalid duration");
                    return;
                }
                self.duration_secs = duration_secs;
                self.duration_known = true;
                self.position_secs = self.position_secs.min(duration_secs);
                self.emit_position();
            }
            OutputEvent::TimeUpdate { position_secs } => {
                if !position_secs.is_finite() {
                    return;
                }
                let position = position_secs.max(0.0);
                self.position_secs = if self.duration_known {
                    position.min(self.duration_secs)
                } else {
                    position
                };
                self.emit_position();
            }
            OutputEvent::Ended => self.finish_track(),
            OutputEvent::Failed { message } => self.fail_transport(message),
        }
    }

    /// Natural end of the current track
    ///
    /// Loop restarts it, a non-empty queue advances, anything else stops at
    /// position 0 with the track still bound. Album and library
    /// continuation are only used by explicit skips.
    fn finish_track(&mut self) {
        if let Some(track) = &self.current_track {
            let file_name = track.file_name.clone();
            self.pending_events
                .push(PlaybackEvent::TrackFinished { file_name });
        }

        if self.looping {
            self.restart_current();
            // A pause that raced the end notification keeps the output paused
            if self.is_playing {
                if let Err(e) = self.output.play() {
                    self.fail_transport(e.to_string());
                }
            }
            return;
        }

        if let Some(track) = self.take_from_queue() {
            self.advance_to(track, TrackChangeReason::Queue);
            return;
        }

        self.is_playing = false;
        self.position_secs = 0.0;
        if let Err(e) = self.output.seek(0.0) {
            warn!(error = %e, "Output failed to rewind after end");
        }
        self.emit_state_changed();
        self.emit_position();
    }

    // ===== Queue =====

    /// Append a track to the queue
    pub fn add_to_queue(&mut self, track: Track) {
        debug!(file_name = %track.file_name, "Queued track");
        self.queue.push_back(track);
        self.emit_queue_changed();
    }

    /// Remove the queue entry at `index`
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let removed = self.queue.remove(index);
        if removed.is_some() {
            self.emit_queue_changed();
        }
        removed
    }

    /// Empty the queue
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit_queue_changed();
    }

    /// Replace the queue order
    ///
    /// `new_order` must hold exactly the queued tracks; anything else is
    /// ignored. Returns whether the new order was applied.
    pub fn reorder_queue(&mut self, new_order: Vec<Track>) -> bool {
        if self.queue.reorder(new_order) {
            self.emit_queue_changed();
            true
        } else {
            debug!("Queue reorder ignored, not a permutation of the queue");
            false
        }
    }

    // ===== Modes =====

    pub fn toggle_loop(&mut self) {
        self.set_looping(!self.looping);
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
        self.emit_modes_changed();
    }

    pub fn toggle_shuffle(&mut self) {
        self.set_shuffling(!self.shuffling);
    }

    pub fn set_shuffling(&mut self, shuffling: bool) {
        self.shuffling = shuffling;
        self.emit_modes_changed();
    }

    pub fn toggle_expanded_view(&mut self) {
        self.set_expanded_view(!self.expanded_view);
    }

    pub fn set_expanded_view(&mut self, visible: bool) {
        self.expanded_view = visible;
        self.pending_events
            .push(PlaybackEvent::ExpandedViewChanged { visible });
    }

    // ===== Volume =====

    /// Set volume (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    fn apply_volume(&mut self) {
        if let Err(e) = self.output.set_volume(self.volume.gain()) {
            warn!(error = %e, "Output rejected volume change");
        }
        self.pending_events.push(PlaybackEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    // ===== Catalog =====

    /// Replace the pool used for album and library continuation
    pub fn set_catalog(&mut self, catalog: Vec<Track>) {
        debug!(tracks = catalog.len(), "Catalog snapshot updated");
        self.catalog = catalog;
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlaybackState {
        match (&self.current_track, self.is_playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Duration in seconds, 0 until the output reports it
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.shuffling
    }

    pub fn is_expanded_view_visible(&self) -> bool {
        self.expanded_view
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Queued tracks, head first
    pub fn queue(&self) -> Vec<&Track> {
        self.queue.get_all()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// History, oldest first
    pub fn history(&self) -> Vec<&Track> {
        self.history.get_all()
    }

    pub fn catalog(&self) -> &[Track] {
        &self.catalog
    }

    /// Token of the latest load, for outputs that tag their notifications
    pub fn load_token(&self) -> LoadToken {
        self.load_token
    }

    /// URL the output was last told to load, while a track is bound
    pub fn current_source_url(&self) -> Option<&str> {
        self.current_track
            .as_ref()
            .map(|track| track.signed_url.as_str())
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &O {
        &self.output
    }

    // ===== Internals =====

    fn take_from_queue(&mut self) -> Option<Track> {
        if self.queue.is_empty() {
            return None;
        }
        let track = if self.shuffling {
            self.queue.take_random(&mut self.rng)
        } else {
            self.queue.pop_front()
        };
        if track.is_some() {
            self.emit_queue_changed();
        }
        track
    }

    /// Push the current track onto history, then load `track`
    fn advance_to(&mut self, track: Track, reason: TrackChangeReason) {
        if let Some(current) = self.current_track.clone() {
            self.history.push(current);
        }
        self.load(track, reason);
    }

    /// Bind `track` to the output and mark it playing from 0
    fn load(&mut self, track: Track, reason: TrackChangeReason) {
        let previous_file_name = self.current_track.as_ref().map(|t| t.file_name.clone());

        self.load_token = self.load_token.next();
        self.is_playing = true;
        self.awaiting_ready = true;
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
        self.duration_known = false;

        info!(
            file_name = %track.file_name,
            reason = ?reason,
            token = self.load_token.value(),
            "Loading track"
        );

        let url = track.signed_url.clone();
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track: track.clone(),
            previous_file_name,
            reason,
        });
        self.current_track = Some(track);

        let loaded = self
            .output
            .set_volume(self.volume.gain())
            .and_then(|()| self.output.load(&url, self.load_token));
        if let Err(e) = loaded {
            self.fail_transport(e.to_string());
            self.emit_position();
            return;
        }

        self.emit_state_changed();
        self.emit_position();
    }

    fn restart_current(&mut self) {
        if let Err(e) = self.output.seek(0.0) {
            warn!(error = %e, "Output failed to rewind");
        }
        self.position_secs = 0.0;
        self.emit_position();
    }

    /// Exhausted fallback: stop without unbinding the track
    fn halt(&mut self) {
        if !self.is_playing {
            return;
        }
        self.is_playing = false;
        if let Err(e) = self.output.pause() {
            warn!(error = %e, "Output failed to pause");
        }
        self.emit_state_changed();
    }

    /// The output could not load or play: stop and wait for the user
    fn fail_transport(&mut self, message: String) {
        warn!(message = %message, "Media output failed");
        self.is_playing = false;
        self.awaiting_ready = false;
        self.emit_error(message);
        self.emit_state_changed();
    }

    // ===== Event Emission =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            state: self.state(),
        });
    }

    fn emit_position(&mut self) {
        self.pending_events.push(PlaybackEvent::PositionUpdate {
            position_secs: self.position_secs,
            duration_secs: self.duration_secs,
        });
    }

    fn emit_modes_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::ModesChanged {
            looping: self.looping,
            shuffling: self.shuffling,
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}
