//! Playlist metadata operations.

use crate::client::read_json;
use crate::error::{Result, ServerClientError};
use crate::types::PlaylistMetadata;
use reqwest::Client;
use tracing::debug;

/// Playlist client for the Vaultify backend.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Push playlist metadata to the server.
    pub async fn update_playlist_metadata(&self, playlist: &PlaylistMetadata) -> Result<()> {
        let url = format!("{}/update-playlist-metadata", self.base_url);
        debug!(url = %url, playlist_id = %playlist.id, "Updating playlist metadata");

        let response = self.http.post(&url).json(playlist).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ServerClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Fetch the metadata stored for one playlist.
    pub async fn playlist_metadata(&self, id: &str) -> Result<PlaylistMetadata> {
        let url = format!(
            "{}/playlist-metadata/{}",
            self.base_url,
            urlencoding::encode(id)
        );
        debug!(url = %url, playlist_id = %id, "Fetching playlist metadata");

        let response = self.http.get(&url).send().await?;
        read_json(response, "playlist metadata").await
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
