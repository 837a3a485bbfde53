//! Vaultify Server Client
//!
//! HTTP client for the Vaultify storage backend. The backend signs audio
//! URLs, stores uploads and keeps track and playlist metadata.
//!
//! # Features
//!
//! - **Library**: fetch the signed catalog, edit and look up track metadata
//! - **Playlists**: push and fetch playlist metadata
//! - **Upload**: upload a local file or have the server fetch a URL
//!
//! # Example
//!
//! ```ignore
//! use vaultify_server_client::{ServerConfig, VaultifyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VaultifyClient::new(ServerConfig::new("http://localhost:3000"))?;
//!
//!     let tracks = client.library().audio_urls().await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod library;
mod playlists;
mod types;
mod upload;

// Re-export main types
pub use client::VaultifyClient;
pub use error::{Result, ServerClientError};
pub use types::{
    FetchMetadataRequest, MetadataMatches, PlaylistMetadata, ServerConfig, UploadFromUrlRequest,
    UploadedTrack,
};

// Re-export sub-clients for direct use if needed
pub use library::LibraryClient;
pub use playlists::PlaylistClient;
pub use upload::UploadClient;
