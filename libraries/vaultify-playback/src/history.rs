//! Playback history tracking
//!
//! Stack of previously current tracks for "previous" navigation

use std::collections::VecDeque;
use vaultify_core::Track;

/// Playback history with bounded size
///
/// Push and pop both happen at the back. When full, the oldest entry is
/// dropped from the front.
#[derive(Debug, Clone)]
pub struct History {
    /// History buffer (most recent = back)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl History {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Add track to history
    ///
    /// If history is full, oldest track is discarded
    pub fn push(&mut self, track: Track) {
        if self.tracks.len() >= self.max_size {
            self.tracks.pop_front();
        }
        self.tracks.push_back(track);
    }

    /// Get most recent track (without removing)
    #[allow(dead_code)]
    pub fn peek(&self) -> Option<&Track> {
        self.tracks.back()
    }

    /// Pop most recent track from history
    pub fn pop(&mut self) -> Option<Track> {
        self.tracks.pop_back()
    }

    /// Get all history tracks (oldest first)
    pub fn get_all(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    #[allow(dead_code)]
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(500)
    }
}
