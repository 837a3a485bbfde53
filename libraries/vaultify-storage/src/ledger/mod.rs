//! Favorites, recently played and playlists
//!
//! The ledger is an ordered list of playlists. Two of them are built in:
//! `favorites` (membership set) and `recently-played` (most recent first,
//! capped and deduplicated). The rest are user playlists and collections
//! generated from catalog metadata. The whole list is persisted as one JSON
//! document.

mod auto;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use vaultify_core::{slugify, Playlist, Track, FAVORITES_ID, RECENTLY_PLAYED_ID};

use crate::error::{Result, StorageError};
use crate::local_store::{self, KEY_PLAYLISTS};

/// Maximum entries kept in recently played
pub const RECENTLY_PLAYED_LIMIT: usize = 20;

/// In-memory ledger of playlists
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    playlists: Vec<Playlist>,
}

impl Ledger {
    /// Ledger holding only the two built-in playlists
    pub fn new() -> Self {
        Self::from_playlists(Vec::new())
    }

    /// Wrap stored playlists, adding any missing built-in playlist
    pub fn from_playlists(mut playlists: Vec<Playlist>) -> Self {
        if !playlists.iter().any(|p| p.id == RECENTLY_PLAYED_ID) {
            playlists.insert(0, Playlist::new(RECENTLY_PLAYED_ID, "Recently Played"));
        }
        if !playlists.iter().any(|p| p.id == FAVORITES_ID) {
            playlists.insert(0, Playlist::new(FAVORITES_ID, "Favorites"));
        }
        Self { playlists }
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    fn playlist_mut(&mut self, id: &str) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id == id)
    }

    fn system_songs(&self, id: &str) -> &[Track] {
        self.playlist(id)
            .map(|p| p.songs.as_slice())
            .unwrap_or_default()
    }

    fn system_mut(&mut self, id: &str, name: &str) -> &mut Playlist {
        let index = match self.playlists.iter().position(|p| p.id == id) {
            Some(index) => index,
            None => {
                self.playlists.push(Playlist::new(id, name));
                self.playlists.len() - 1
            }
        };
        &mut self.playlists[index]
    }

    // ===== Favorites =====

    pub fn favorites(&self) -> &[Track] {
        self.system_songs(FAVORITES_ID)
    }

    pub fn is_favorite(&self, file_name: &str) -> bool {
        self.favorites().iter().any(|t| t.file_name == file_name)
    }

    /// Flip favorite membership; returns the new membership
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        let favorites = self.system_mut(FAVORITES_ID, "Favorites");
        if favorites.contains(&track.file_name) {
            favorites.songs.retain(|t| t.file_name != track.file_name);
            debug!(file_name = %track.file_name, "Removed from favorites");
            false
        } else {
            favorites.songs.push(track.clone());
            debug!(file_name = %track.file_name, "Added to favorites");
            true
        }
    }

    // ===== Recently played =====

    /// Most recent first
    pub fn recently_played(&self) -> &[Track] {
        self.system_songs(RECENTLY_PLAYED_ID)
    }

    /// Move `track` to the front of recently played, keeping at most
    /// [`RECENTLY_PLAYED_LIMIT`] entries
    pub fn record_play(&mut self, track: &Track) {
        let recent = self.system_mut(RECENTLY_PLAYED_ID, "Recently Played");
        recent.songs.retain(|t| t.file_name != track.file_name);
        recent.songs.insert(0, track.clone());
        recent.songs.truncate(RECENTLY_PLAYED_LIMIT);
    }

    // ===== User playlists =====

    /// Create an empty user playlist and return its id
    pub fn create_playlist(&mut self, name: &str) -> String {
        let id = format!(
            "playlist-{}-{}",
            slugify(name),
            Utc::now().timestamp_millis()
        );
        let mut playlist = Playlist::new(id.clone(), name);
        playlist.kind = Some("playlist".to_string());
        self.playlists.push(playlist);
        id
    }

    /// Rename a user playlist; auto playlists keep their generated name
    pub fn rename_playlist(&mut self, id: &str, name: &str) -> bool {
        match self.playlist_mut(id) {
            Some(playlist) if !playlist.is_auto => {
                playlist.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    /// Delete a user playlist; built-in and auto playlists are kept
    pub fn delete_playlist(&mut self, id: &str) -> bool {
        let deletable = self
            .playlist(id)
            .is_some_and(|p| !p.is_system() && !p.is_auto);
        if deletable {
            self.playlists.retain(|p| p.id != id);
        }
        deletable
    }

    /// Append `track` unless the playlist already holds it
    pub fn add_to_playlist(&mut self, id: &str, track: &Track) -> bool {
        match self.playlist_mut(id) {
            Some(playlist) if !playlist.contains(&track.file_name) => {
                playlist.songs.push(track.clone());
                true
            }
            _ => false,
        }
    }

    pub fn remove_from_playlist(&mut self, id: &str, file_name: &str) -> bool {
        let Some(playlist) = self.playlist_mut(id) else {
            return false;
        };
        let before = playlist.songs.len();
        playlist.songs.retain(|t| t.file_name != file_name);
        playlist.songs.len() != before
    }

    /// Move the song at `from` so it ends up at `to`
    pub fn reorder_playlist(&mut self, id: &str, from: usize, to: usize) -> bool {
        let Some(playlist) = self.playlist_mut(id) else {
            return false;
        };
        if from >= playlist.songs.len() || to >= playlist.songs.len() {
            return false;
        }
        let song = playlist.songs.remove(from);
        playlist.songs.insert(to, song);
        true
    }

    /// Set a playlist cover
    pub fn set_cover(&mut self, id: &str, cover_url: &str) -> Result<()> {
        let playlist = self
            .playlist_mut(id)
            .ok_or_else(|| StorageError::not_found("Playlist", id))?;
        playlist.cover_url = Some(cover_url.to_string());
        Ok(())
    }

    // ===== Auto collections =====

    /// Rebuild genre, artist and album collections from `catalog`
    ///
    /// Built-in and user playlists are kept; previous auto playlists are
    /// replaced, keeping their covers.
    pub fn regenerate_auto_playlists(&mut self, catalog: &[Track]) {
        let generated = auto::generate(catalog, &self.playlists);

        let mut playlists: Vec<Playlist> = Vec::with_capacity(self.playlists.len());
        playlists.extend(self.playlists.iter().filter(|p| p.is_system()).cloned());
        playlists.extend(
            self.playlists
                .iter()
                .filter(|p| !p.is_system() && !p.is_auto)
                .cloned(),
        );
        debug!(collections = generated.len(), "Regenerated auto playlists");
        playlists.extend(generated);
        self.playlists = playlists;
    }

    /// Auto-generated playlists, in display order
    pub fn auto_playlists(&self) -> impl Iterator<Item = &Playlist> {
        self.playlists.iter().filter(|p| p.is_auto)
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Load the persisted ledger
///
/// A missing document yields the built-in playlists only. A document that
/// no longer parses is discarded with a warning.
pub async fn load(pool: &SqlitePool) -> Result<Ledger> {
    match local_store::get_json::<Vec<Playlist>>(pool, KEY_PLAYLISTS).await {
        Ok(Some(playlists)) => Ok(Ledger::from_playlists(playlists)),
        Ok(None) => Ok(Ledger::new()),
        Err(StorageError::Serialization(e)) => {
            warn!(error = %e, "Discarding unreadable playlists");
            Ok(Ledger::new())
        }
        Err(e) => Err(e),
    }
}

/// Persist the whole ledger
pub async fn save(pool: &SqlitePool, ledger: &Ledger) -> Result<()> {
    local_store::set_json(pool, KEY_PLAYLISTS, ledger.playlists()).await
}
