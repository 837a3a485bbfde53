//! Catalog and track metadata operations.

use crate::client::read_json;
use crate::error::Result;
use crate::types::{FetchMetadataRequest, MetadataMatches};
use reqwest::Client;
use tracing::debug;
use vaultify_core::Track;

/// Library client for the Vaultify backend.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Fetch the whole catalog with freshly signed URLs.
    pub async fn audio_urls(&self) -> Result<Vec<Track>> {
        let url = format!("{}/audio-urls", self.base_url);
        debug!(url = %url, "Fetching catalog");

        let response = self.http.get(&url).send().await?;
        let tracks: Vec<Track> = read_json(response, "catalog").await?;

        debug!(tracks = tracks.len(), "Fetched catalog");
        Ok(tracks)
    }

    /// Store edited metadata for a track; returns the server's copy.
    pub async fn update_metadata(&self, track: &Track) -> Result<Track> {
        let url = format!("{}/update-metadata", self.base_url);
        debug!(url = %url, file_name = %track.file_name, "Updating track metadata");

        let response = self.http.post(&url).json(track).send().await?;
        read_json(response, "metadata update").await
    }

    /// Look up candidate metadata for a stored file.
    pub async fn fetch_metadata(&self, file_name: &str) -> Result<Vec<Track>> {
        let url = format!("{}/fetch-metadata", self.base_url);
        debug!(url = %url, file_name = %file_name, "Searching metadata");

        let body = FetchMetadataRequest {
            file_name: file_name.to_string(),
        };
        let response = self.http.post(&url).json(&body).send().await?;
        let found: MetadataMatches = read_json(response, "metadata search").await?;

        debug!(matches = found.matches.len(), "Metadata search complete");
        Ok(found.matches)
    }

    /// Every metadata record the server holds.
    pub async fn all_metadata(&self) -> Result<Vec<Track>> {
        let url = format!("{}/all-metadata", self.base_url);
        debug!(url = %url, "Fetching all metadata");

        let response = self.http.get(&url).send().await?;
        read_json(response, "metadata").await
    }
}
