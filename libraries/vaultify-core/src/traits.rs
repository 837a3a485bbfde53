/// Core traits for Vaultify
use crate::error::Result;
use crate::types::Track;
use async_trait::async_trait;

/// Remote source of the full track catalog
///
/// The catalog cache refetches through this seam once its snapshot goes
/// stale. The HTTP client implements it against `GET /audio-urls`; tests
/// implement it in memory.
#[async_trait]
pub trait TrackCatalogSource: Send + Sync {
    /// Fetch every known track, in server order
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

#[async_trait]
impl<T: TrackCatalogSource + ?Sized> TrackCatalogSource for std::sync::Arc<T> {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        (**self).fetch_tracks().await
    }
}
