//! Test helpers and fixtures for storage integration tests
//!
//! Databases are REAL SQLite files in a temp dir (NOT in-memory) so that
//! reopening a pool sees what the previous one wrote.

#![allow(dead_code)]

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;
use vaultify_core::{Track, TrackCatalogSource, VaultifyError};

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("test.db");
        let pool = open(&path).await;

        Self {
            pool,
            path,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the pool and open a fresh one on the same file
    pub async fn reopen(&mut self) {
        self.pool.close().await;
        self.pool = open(&self.path).await;
    }
}

async fn open(path: &std::path::Path) -> SqlitePool {
    let db_url = format!("sqlite://{}", path.display());
    let pool = vaultify_storage::create_pool(&db_url)
        .await
        .expect("Failed to create pool");
    vaultify_storage::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Test fixture: a track with a predictable signed URL
pub fn create_test_track(name: &str) -> Track {
    Track::new(format!("{}.mp3", name), format!("https://cdn.test/{}.mp3", name))
}

/// In-memory catalog source that counts fetches and can be made to fail
pub struct FakeCatalog {
    tracks: Mutex<Vec<Track>>,
    failing: Mutex<bool>,
    calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks: Mutex::new(tracks),
            failing: Mutex::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_tracks(&self, tracks: Vec<Track>) {
        *self.tracks.lock().unwrap() = tracks;
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrackCatalogSource for FakeCatalog {
    async fn fetch_tracks(&self) -> vaultify_core::Result<Vec<Track>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.failing.lock().unwrap() {
            return Err(VaultifyError::network("connection refused"));
        }
        Ok(self.tracks.lock().unwrap().clone())
    }
}
