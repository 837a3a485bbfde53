//! Main Vaultify backend client.

use crate::error::{Result, ServerClientError};
use crate::library::LibraryClient;
use crate::playlists::PlaylistClient;
use crate::types::ServerConfig;
use crate::upload::UploadClient;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use vaultify_core::{Track, TrackCatalogSource};

/// Main client for the Vaultify backend.
///
/// Cheap to clone; clones share the connection pool.
///
/// # Example
///
/// ```ignore
/// use vaultify_server_client::{ServerConfig, VaultifyClient};
///
/// let client = VaultifyClient::new(ServerConfig::new("http://localhost:3000"))?;
///
/// let tracks = client.library().audio_urls().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct VaultifyClient {
    http: Client,
    base_url: String,
}

impl VaultifyClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ServerClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ServerClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&base_url).map_err(|e| ServerClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Vaultify/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        debug!(url = %base_url, "Created server client");

        Ok(Self { http, base_url })
    }

    /// Get the normalized server URL.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Catalog and track metadata operations.
    pub fn library(&self) -> LibraryClient<'_> {
        LibraryClient::new(&self.http, &self.base_url)
    }

    /// Playlist metadata operations.
    pub fn playlists(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.base_url)
    }

    /// Upload operations.
    pub fn uploads(&self) -> UploadClient<'_> {
        UploadClient::new(&self.http, &self.base_url)
    }
}

#[async_trait]
impl TrackCatalogSource for VaultifyClient {
    async fn fetch_tracks(&self) -> vaultify_core::Result<Vec<Track>> {
        Ok(self.library().audio_urls().await?)
    }
}

/// Decode a successful JSON response, or turn the status into an error.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(|e| {
            ServerClientError::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    } else {
        let error_text = response.text().await.unwrap_or_default();
        Err(ServerClientError::ServerError {
            status: status.as_u16(),
            message: error_text,
        })
    }
}
