//! Catalog cache
//!
//! Keeps the last fetched track list and when it was fetched, both in
//! memory and in the local store. A snapshot younger than the staleness
//! window is served as is; an older one triggers a refetch. A failed
//! refetch keeps serving the old snapshot.

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};
use vaultify_core::{Track, TrackCatalogSource};

use crate::error::{Result, StorageError};
use crate::local_store::{self, KEY_SONGS_CACHE, KEY_SONGS_CACHE_TIME};

/// Catalog cache configuration
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    /// How long a fetched snapshot counts as fresh
    pub staleness: Duration,
}

impl CatalogCacheConfig {
    /// Window given in whole seconds
    pub fn from_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs).unwrap_or(i64::MAX).min(i64::MAX / 1000);
        Self {
            staleness: Duration::seconds(secs),
        }
    }
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self {
            staleness: Duration::minutes(5),
        }
    }
}

/// Cached track catalog backed by a remote source
pub struct CatalogCache<S> {
    pool: SqlitePool,
    source: S,
    config: CatalogCacheConfig,
    tracks: Vec<Track>,
    fetched_at: Option<DateTime<Utc>>,
}

impl<S: TrackCatalogSource> CatalogCache<S> {
    /// Restore the persisted snapshot, if any
    ///
    /// A snapshot that no longer parses is discarded with a warning and the
    /// cache starts empty (and therefore stale).
    pub async fn load(pool: SqlitePool, source: S, config: CatalogCacheConfig) -> Result<Self> {
        let (tracks, fetched_at) = match read_snapshot(&pool).await {
            Ok(snapshot) => snapshot,
            Err(StorageError::Serialization(e)) => {
                warn!(error = %e, "Discarding unreadable catalog snapshot");
                (Vec::new(), None)
            }
            Err(e) => return Err(e),
        };

        debug!(
            tracks = tracks.len(),
            fetched_at = ?fetched_at,
            "Catalog cache restored"
        );

        Ok(Self {
            pool,
            source,
            config,
            tracks,
            fetched_at,
        })
    }

    /// Current catalog, refetched first if stale
    pub async fn get_all(&mut self) -> &[Track] {
        self.get_all_at(Utc::now()).await
    }

    /// Current catalog as of `now`, refetched first if stale
    pub async fn get_all_at(&mut self, now: DateTime<Utc>) -> &[Track] {
        if !self.is_fresh_at(now) {
            self.refresh_at(now).await;
        }
        &self.tracks
    }

    /// Refetch regardless of freshness
    pub async fn force_refresh(&mut self) -> &[Track] {
        self.refresh_at(Utc::now()).await;
        &self.tracks
    }

    /// Whether the snapshot is still inside the staleness window at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.fetched_at
            .is_some_and(|fetched_at| now - fetched_at < self.config.staleness)
    }

    /// Snapshot as held, without checking freshness
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn last_fetched(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Look a track up by file name in the held snapshot
    pub fn find(&self, file_name: &str) -> Result<&Track> {
        self.tracks
            .iter()
            .find(|track| track.file_name == file_name)
            .ok_or_else(|| StorageError::not_found("Track", file_name))
    }

    /// Fetch from the source, replacing the snapshot on success
    async fn refresh_at(&mut self, now: DateTime<Utc>) {
        let tracks = match self.source.fetch_tracks().await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(
                    error = %e,
                    cached = self.tracks.len(),
                    "Catalog fetch failed, keeping cached snapshot"
                );
                return;
            }
        };

        info!(tracks = tracks.len(), "Catalog refreshed");
        self.tracks = tracks;
        self.fetched_at = Some(now);

        if let Err(e) = write_snapshot(&self.pool, &self.tracks, now).await {
            warn!(error = %e, "Failed to persist catalog snapshot");
        }
    }
}

async fn read_snapshot(pool: &SqlitePool) -> Result<(Vec<Track>, Option<DateTime<Utc>>)> {
    let tracks: Vec<Track> = local_store::get_json(pool, KEY_SONGS_CACHE)
        .await?
        .unwrap_or_default();
    let millis: Option<i64> = local_store::get_json(pool, KEY_SONGS_CACHE_TIME).await?;
    let fetched_at = millis.and_then(|ms| Utc.timestamp_millis_opt(ms).single());

    // A list without a timestamp cannot be trusted as fresh
    Ok((tracks, fetched_at))
}

async fn write_snapshot(pool: &SqlitePool, tracks: &[Track], at: DateTime<Utc>) -> Result<()> {
    local_store::set_json(pool, KEY_SONGS_CACHE, tracks).await?;
    local_store::set_json(pool, KEY_SONGS_CACHE_TIME, &at.timestamp_millis()).await?;
    Ok(())
}
