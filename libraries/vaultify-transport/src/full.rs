//! Expanded player
//!
//! Cover, titles, favorite toggle, seek bar, transport buttons and the
//! queue. Seeks and queue reorders are computed here and proposed to the
//! engine, which stays the judge of whether they apply.

use crate::format::format_time;
use crate::surface::NowPlaying;
use vaultify_core::Track;
use vaultify_storage::Ledger;

/// Map a click on the seek bar to a position
///
/// `offset` is measured from the bar's left edge. Returns `None` when the
/// result falls outside `[0, duration]`.
pub fn seek_target(offset: f64, width: f64, duration_secs: f64) -> Option<f64> {
    if width <= 0.0 {
        return None;
    }
    let target = offset / width * duration_secs;
    (0.0..=duration_secs).contains(&target).then_some(target)
}

/// Caption under the transport buttons
pub fn queue_label(len: usize) -> String {
    format!("{} in queue", len)
}

/// Drag-and-drop state for the queue list
#[derive(Debug, Clone, Default)]
pub struct QueueDrag {
    from: Option<usize>,
}

impl QueueDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, from: usize) {
        self.from = Some(from);
    }

    pub fn cancel(&mut self) {
        self.from = None;
    }

    pub fn dragging(&self) -> Option<usize> {
        self.from
    }

    /// Finish the drag over `to` and build the proposed order
    ///
    /// The dragged entry is removed at its start index and inserted at
    /// `to`. Returns `None` without an active drag or with an index past
    /// the end of `queue`.
    pub fn drop_at(&mut self, to: usize, queue: &[Track]) -> Option<Vec<Track>> {
        let from = self.from.take()?;
        if from >= queue.len() || to >= queue.len() {
            return None;
        }
        let mut order = queue.to_vec();
        let moved = order.remove(from);
        order.insert(to, moved);
        Some(order)
    }
}

/// Read-only view of the expanded player
#[derive(Debug, Clone, Copy)]
pub struct FullPlayer<'a> {
    now_playing: &'a NowPlaying,
}

impl<'a> FullPlayer<'a> {
    pub(crate) fn new(now_playing: &'a NowPlaying) -> Self {
        Self { now_playing }
    }

    /// Shown while a track is bound and the expanded view is on
    pub fn is_visible(&self) -> bool {
        self.now_playing.track.is_some() && self.now_playing.expanded
    }

    pub fn track(&self) -> Option<&'a Track> {
        self.now_playing.track.as_ref()
    }

    pub fn title(&self) -> &'a str {
        self.track().map_or("", Track::display_title)
    }

    pub fn artist(&self) -> &'a str {
        self.track().map_or("", Track::display_artist)
    }

    pub fn album(&self) -> Option<&'a str> {
        self.track().and_then(|t| t.album.as_deref())
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.now_playing.position_secs)
    }

    pub fn duration_label(&self) -> String {
        format_time(self.now_playing.duration_secs)
    }

    pub fn queue(&self) -> &'a [Track] {
        &self.now_playing.queue
    }

    pub fn queue_label(&self) -> String {
        queue_label(self.now_playing.queue.len())
    }

    pub fn is_favorite(&self, ledger: &Ledger) -> bool {
        self.track()
            .is_some_and(|track| ledger.is_favorite(&track.file_name))
    }

    pub fn is_shuffling(&self) -> bool {
        self.now_playing.shuffling
    }

    pub fn is_looping(&self) -> bool {
        self.now_playing.looping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names
            .iter()
            .map(|n| Track::new(format!("{}.mp3", n), "https://cdn.test/t"))
            .collect()
    }

    fn names(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.file_name.as_str()).collect()
    }

    #[test]
    fn seek_target_maps_offset_to_time() {
        assert_eq!(seek_target(50.0, 200.0, 120.0), Some(30.0));
        assert_eq!(seek_target(0.0, 200.0, 120.0), Some(0.0));
        assert_eq!(seek_target(200.0, 200.0, 120.0), Some(120.0));
    }

    #[test]
    fn seek_target_rejects_outside_bar() {
        assert_eq!(seek_target(-1.0, 200.0, 120.0), None);
        assert_eq!(seek_target(201.0, 200.0, 120.0), None);
        assert_eq!(seek_target(10.0, 0.0, 120.0), None);
    }

    #[test]
    fn queue_label_counts() {
        assert_eq!(queue_label(0), "0 in queue");
        assert_eq!(queue_label(3), "3 in queue");
    }

    #[test]
    fn drag_moves_entry_forward_and_back() {
        let queue = tracks(&["a", "b", "c", "d"]);
        let mut drag = QueueDrag::new();

        drag.start(0);
        let order = drag.drop_at(2, &queue).unwrap();
        assert_eq!(names(&order), vec!["b.mp3", "c.mp3", "a.mp3", "d.mp3"]);

        drag.start(3);
        let order = drag.drop_at(1, &queue).unwrap();
        assert_eq!(names(&order), vec!["a.mp3", "d.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn drop_without_drag_or_out_of_range_is_none() {
        let queue = tracks(&["a", "b"]);
        let mut drag = QueueDrag::new();
        assert!(drag.drop_at(1, &queue).is_none());

        drag.start(0);
        assert!(drag.drop_at(2, &queue).is_none());
        assert!(drag.dragging().is_none());
    }

    #[test]
    fn hidden_until_expanded() {
        let mut now = NowPlaying {
            track: Some(Track::new("a.mp3", "https://cdn.test/a.mp3")),
            ..NowPlaying::default()
        };
        assert!(!FullPlayer::new(&now).is_visible());

        now.expanded = true;
        assert!(FullPlayer::new(&now).is_visible());

        now.track = None;
        assert!(!FullPlayer::new(&now).is_visible());
    }
}
