//! Types for Vaultify backend requests and responses.

use serde::{Deserialize, Serialize};
use vaultify_core::Track;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "http://localhost:3000")
    pub url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Create a new server config with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

// =============================================================================
// Metadata Types
// =============================================================================

/// Request body for `POST /fetch-metadata`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchMetadataRequest {
    pub file_name: String,
}

/// Response from `POST /fetch-metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataMatches {
    #[serde(default)]
    pub matches: Vec<Track>,
}

/// Playlist metadata kept on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistMetadata {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// File names of the member tracks, in order
    #[serde(default)]
    pub songs: Vec<String>,
}

// =============================================================================
// Upload Types
// =============================================================================

/// Request body for `POST /upload-from-url`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadFromUrlRequest {
    pub url: String,
}

/// Response from either upload endpoint.
///
/// Metadata the server could read from the file is filled in.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedTrack {
    pub signed_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl UploadedTrack {
    /// Turn the upload result into a catalog track stored as `file_name`
    pub fn into_track(self, file_name: impl Into<String>) -> Track {
        Track {
            file_name: file_name.into(),
            signed_url: self.signed_url,
            title: self.title,
            artist: self.artist,
            album: self.album,
            genre: self.genre,
            cover_url: self.cover_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_metadata_request_uses_camel_case() {
        let body = serde_json::to_value(FetchMetadataRequest {
            file_name: "a.mp3".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "fileName": "a.mp3" }));
    }

    #[test]
    fn test_uploaded_track_accepts_sparse_body() {
        let uploaded: UploadedTrack =
            serde_json::from_str(r#"{"signedUrl":"https://cdn.test/a.mp3","title":"A"}"#).unwrap();
        let track = uploaded.into_track("a.mp3");
        assert_eq!(track.file_name, "a.mp3");
        assert_eq!(track.title.as_deref(), Some("A"));
        assert_eq!(track.artist, None);
    }

    #[test]
    fn test_metadata_matches_defaults_to_empty() {
        let matches: MetadataMatches = serde_json::from_str("{}").unwrap();
        assert!(matches.matches.is_empty());
    }
}
