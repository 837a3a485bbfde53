//! Integration tests for ledger persistence

mod test_helpers;

use proptest::prelude::*;
use test_helpers::{create_test_track, TestDb};
use vaultify_core::{FAVORITES_ID, RECENTLY_PLAYED_ID};
use vaultify_storage::ledger::{self, RECENTLY_PLAYED_LIMIT};
use vaultify_storage::local_store::{self, KEY_PLAYLISTS};
use vaultify_storage::Ledger;

#[tokio::test]
async fn test_load_without_document_has_system_playlists() {
    let db = TestDb::new().await;

    let loaded = ledger::load(db.pool()).await.unwrap();
    assert_eq!(loaded, Ledger::new());
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let mut db = TestDb::new().await;

    let mut original = Ledger::new();
    original.toggle_favorite(&create_test_track("a"));
    original.record_play(&create_test_track("b"));
    original.record_play(&create_test_track("a"));
    let id = original.create_playlist("Road Trip");
    original.add_to_playlist(&id, &create_test_track("c"));
    original.regenerate_auto_playlists(&[
        create_test_track("x").with_genre("Jazz"),
        create_test_track("y").with_genre("Jazz"),
    ]);

    ledger::save(db.pool(), &original).await.unwrap();
    db.reopen().await;
    let loaded = ledger::load(db.pool()).await.unwrap();

    assert_eq!(loaded, original);
    assert!(loaded.is_favorite("a.mp3"));
    let recent: Vec<_> = loaded
        .recently_played()
        .iter()
        .map(|t| t.file_name.as_str())
        .collect();
    assert_eq!(recent, vec!["a.mp3", "b.mp3"]);
    assert_eq!(loaded.auto_playlists().count(), 1);
}

#[tokio::test]
async fn test_persisted_document_uses_wire_names() {
    let db = TestDb::new().await;

    let mut original = Ledger::new();
    original.create_playlist("Mine");
    ledger::save(db.pool(), &original).await.unwrap();

    let raw = local_store::get_raw(db.pool(), KEY_PLAYLISTS).await.unwrap().unwrap();
    assert!(raw.contains("\"isAuto\":false"));
    assert!(raw.contains("\"type\":\"playlist\""));
}

#[tokio::test]
async fn test_document_missing_system_playlists_is_repaired() {
    let db = TestDb::new().await;
    local_store::set_json(
        db.pool(),
        KEY_PLAYLISTS,
        &serde_json::json!([{ "id": "playlist-x-1", "name": "X", "songs": [] }]),
    )
    .await
    .unwrap();

    let loaded = ledger::load(db.pool()).await.unwrap();
    let ids: Vec<_> = loaded.playlists().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![FAVORITES_ID, RECENTLY_PLAYED_ID, "playlist-x-1"]);
}

#[tokio::test]
async fn test_corrupt_document_is_discarded() {
    let db = TestDb::new().await;
    local_store::set_json(db.pool(), KEY_PLAYLISTS, &42).await.unwrap();

    let loaded = ledger::load(db.pool()).await.unwrap();
    assert_eq!(loaded, Ledger::new());
}

proptest! {
    /// Property: recently played is capped, deduplicated and most recent first
    #[test]
    fn recently_played_is_capped_and_unique(plays in prop::collection::vec(0u8..40, 1..80)) {
        let mut ledger = Ledger::new();
        for play in &plays {
            ledger.record_play(&create_test_track(&play.to_string()));
        }

        let recent: Vec<_> = ledger
            .recently_played()
            .iter()
            .map(|t| t.file_name.clone())
            .collect();

        prop_assert!(recent.len() <= RECENTLY_PLAYED_LIMIT);
        let mut unique = recent.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), recent.len());

        let last = format!("{}.mp3", plays[plays.len() - 1]);
        prop_assert_eq!(&recent[0], &last);
    }
}
