/// Track domain type
use serde::{Deserialize, Serialize};

/// Playable audio item
///
/// Identity is the `file_name`: two tracks with the same file name are the
/// same track, whatever their metadata says. The playback engine never
/// mutates a track; metadata edits produce a new value from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique storage key on the server
    pub file_name: String,

    /// Time-limited URL the media output streams from
    pub signed_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl Track {
    /// Create a track with no descriptive metadata
    pub fn new(file_name: impl Into<String>, signed_url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            signed_url: signed_url.into(),
            title: None,
            artist: None,
            album: None,
            genre: None,
            cover_url: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_cover_url(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = Some(cover_url.into());
        self
    }

    /// Title for display, falling back to the file name
    pub fn display_title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(&self.file_name)
    }

    /// Artist for display
    pub fn display_artist(&self) -> &str {
        non_blank(self.artist.as_deref()).unwrap_or("Unknown Artist")
    }

    /// Album key used for continuation matching (trimmed, lowercased)
    ///
    /// `None` when the track has no album or the album is blank.
    pub fn album_key(&self) -> Option<String> {
        non_blank(self.album.as_deref()).map(|album| album.trim().to_lowercase())
    }

    /// Whether both tracks carry the same album, ignoring case
    ///
    /// Tracks without an album never share one, not even with each other.
    pub fn shares_album_with(&self, other: &Track) -> bool {
        match (self.album_key(), other.album_key()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
    }
}

impl Eq for Track {}

impl std::hash::Hash for Track {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.file_name.hash(state);
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
