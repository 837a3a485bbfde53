/// Playlist domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};

/// Id of the system favorites playlist
pub const FAVORITES_ID: &str = "favorites";

/// Id of the system recently-played playlist
pub const RECENTLY_PLAYED_ID: &str = "recently-played";

/// Named, ordered collection of tracks
///
/// Favorites and recently played are stored as playlists with fixed ids,
/// next to user playlists and auto-generated collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub songs: Vec<Track>,

    /// Generated from catalog metadata rather than created by the user
    #[serde(default)]
    pub is_auto: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Free-form kind chosen at creation ("playlist" unless stated otherwise)
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Playlist {
    /// Create an empty, non-auto playlist
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            songs: Vec::new(),
            is_auto: false,
            cover_url: None,
            kind: None,
        }
    }

    /// Whether this is one of the two built-in playlists
    pub fn is_system(&self) -> bool {
        self.id == FAVORITES_ID || self.id == RECENTLY_PLAYED_ID
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.songs.iter().any(|song| song.file_name == file_name)
    }
}

/// Lowercase a name and join whitespace runs with `-`
///
/// Used to derive playlist ids such as `genre-hip-hop`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
