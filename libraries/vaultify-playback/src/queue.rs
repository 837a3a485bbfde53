//! Explicit play queue
//!
//! FIFO of tracks the user asked to hear next. Insertion order matters and
//! is only changed by an explicit reorder.

use rand::Rng;
use std::collections::{HashMap, VecDeque};
use vaultify_core::Track;

/// Play queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: VecDeque<Track>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end
    pub fn push_back(&mut self, track: Track) {
        self.tracks.push_back(track);
    }

    /// Insert at the head, so it plays next
    pub fn push_front(&mut self, track: Track) {
        self.tracks.push_front(track);
    }

    /// Remove and return the head
    pub fn pop_front(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Remove and return an entry chosen uniformly at random
    pub fn take_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Track> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.tracks.len());
        self.tracks.remove(index)
    }

    /// Remove the entry at `index`
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        self.tracks.remove(index)
    }

    /// Replace the contents with a permutation of themselves
    ///
    /// Returns `false` and leaves the queue untouched unless `new_order`
    /// holds exactly the same tracks (by file name, counting duplicates).
    pub fn reorder(&mut self, new_order: Vec<Track>) -> bool {
        if !self.is_permutation(&new_order) {
            return false;
        }
        self.tracks = new_order.into();
        true
    }

    fn is_permutation(&self, candidate: &[Track]) -> bool {
        if candidate.len() != self.tracks.len() {
            return false;
        }

        let mut counts: HashMap<&str, isize> = HashMap::new();
        for track in &self.tracks {
            *counts.entry(track.file_name.as_str()).or_default() += 1;
        }
        for track in candidate {
            *counts.entry(track.file_name.as_str()).or_default() -= 1;
        }
        counts.values().all(|count| *count == 0)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get all queued tracks (head first)
    pub fn get_all(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
