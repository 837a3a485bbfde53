//! Integration tests for the catalog cache

mod test_helpers;

use chrono::{Duration, Utc};
use std::sync::Arc;
use test_helpers::{create_test_track, FakeCatalog, TestDb};
use vaultify_core::Track;
use vaultify_storage::local_store::{self, KEY_SONGS_CACHE, KEY_SONGS_CACHE_TIME};
use vaultify_storage::{CatalogCache, CatalogCacheConfig, StorageError};

fn names(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.file_name.as_str()).collect()
}

async fn cache_for(
    db: &TestDb,
    source: &Arc<FakeCatalog>,
) -> CatalogCache<Arc<FakeCatalog>> {
    CatalogCache::load(db.pool().clone(), source.clone(), CatalogCacheConfig::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_empty_cache_fetches_on_first_read() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    assert!(cache.last_fetched().is_none());
    assert_eq!(names(cache.get_all().await), vec!["a.mp3"]);
    assert_eq!(source.calls(), 1);
    assert!(cache.last_fetched().is_some());
}

#[tokio::test]
async fn test_fresh_snapshot_is_served_without_fetching() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    let start = Utc::now();
    cache.get_all_at(start).await;
    source.set_tracks(vec![create_test_track("b")]);

    let later = start + Duration::minutes(4);
    assert_eq!(names(cache.get_all_at(later).await), vec!["a.mp3"]);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_stale_snapshot_is_refetched() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    let start = Utc::now();
    cache.get_all_at(start).await;
    source.set_tracks(vec![create_test_track("b")]);

    let later = start + Duration::minutes(6);
    assert!(!cache.is_fresh_at(later));
    assert_eq!(names(cache.get_all_at(later).await), vec!["b.mp3"]);
    assert_eq!(source.calls(), 2);
    assert_eq!(cache.last_fetched(), Some(later));
}

#[tokio::test]
async fn test_window_boundary_counts_as_stale() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    let start = Utc::now();
    cache.get_all_at(start).await;

    assert!(cache.is_fresh_at(start + Duration::minutes(5) - Duration::milliseconds(1)));
    assert!(!cache.is_fresh_at(start + Duration::minutes(5)));
}

#[tokio::test]
async fn test_failed_refetch_keeps_old_snapshot() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    let start = Utc::now();
    cache.get_all_at(start).await;
    source.set_failing(true);

    let later = start + Duration::minutes(10);
    assert_eq!(names(cache.get_all_at(later).await), vec!["a.mp3"]);
    assert_eq!(cache.last_fetched(), Some(start));

    // Still stale, so the next read tries again
    cache.get_all_at(later).await;
    assert_eq!(source.calls(), 3);
}

#[tokio::test]
async fn test_failed_first_fetch_yields_empty_catalog() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    source.set_failing(true);
    let mut cache = cache_for(&db, &source).await;

    assert!(cache.get_all().await.is_empty());
    assert!(cache.last_fetched().is_none());
}

#[tokio::test]
async fn test_force_refresh_ignores_freshness() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    cache.get_all().await;
    source.set_tracks(vec![create_test_track("b"), create_test_track("c")]);

    assert_eq!(names(cache.force_refresh().await), vec!["b.mp3", "c.mp3"]);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_snapshot_survives_reload() {
    let mut db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![
        create_test_track("a").with_album("Blue"),
        create_test_track("b"),
    ]));

    let fetched_at = {
        let mut cache = cache_for(&db, &source).await;
        cache.get_all().await;
        cache.last_fetched().unwrap()
    };

    db.reopen().await;
    let mut cache = cache_for(&db, &source).await;

    assert_eq!(names(cache.tracks()), vec!["a.mp3", "b.mp3"]);
    assert_eq!(cache.tracks()[0].album.as_deref(), Some("Blue"));
    assert_eq!(
        cache.last_fetched().map(|t| t.timestamp_millis()),
        Some(fetched_at.timestamp_millis())
    );

    // Restored snapshot is still fresh, no fetch needed
    cache.get_all().await;
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_snapshot_is_persisted_as_json_and_millis() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;
    cache.get_all().await;

    let raw = local_store::get_raw(db.pool(), KEY_SONGS_CACHE).await.unwrap().unwrap();
    assert!(raw.contains("\"fileName\":\"a.mp3\""));
    assert!(raw.contains("\"signedUrl\""));

    let millis: Option<i64> = local_store::get_json(db.pool(), KEY_SONGS_CACHE_TIME)
        .await
        .unwrap();
    assert_eq!(millis, cache.last_fetched().map(|t| t.timestamp_millis()));
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let db = TestDb::new().await;
    local_store::set_json(db.pool(), KEY_SONGS_CACHE, &"not a track list")
        .await
        .unwrap();

    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;

    assert!(cache.tracks().is_empty());
    assert_eq!(names(cache.get_all().await), vec!["a.mp3"]);
}

#[tokio::test]
async fn test_find_by_file_name() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let mut cache = cache_for(&db, &source).await;
    cache.get_all().await;

    assert_eq!(cache.find("a.mp3").unwrap().signed_url, "https://cdn.test/a.mp3");
    assert!(matches!(
        cache.find("missing.mp3"),
        Err(StorageError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_custom_staleness_window() {
    let db = TestDb::new().await;
    let source = Arc::new(FakeCatalog::new(vec![create_test_track("a")]));
    let config = CatalogCacheConfig {
        staleness: Duration::seconds(30),
    };
    let mut cache = CatalogCache::load(db.pool().clone(), source.clone(), config)
        .await
        .unwrap();

    let start = Utc::now();
    cache.get_all_at(start).await;
    cache.get_all_at(start + Duration::seconds(31)).await;
    assert_eq!(source.calls(), 2);
}
