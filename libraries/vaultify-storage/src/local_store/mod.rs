//! Durable key/value store
//!
//! Stores JSON documents under well-known keys. Each key holds one value;
//! writes replace the previous document.
//!
//! # Example
//!
//! ```rust,no_run
//! use vaultify_storage::local_store;
//! # async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! local_store::set_json(pool, local_store::KEY_THEME, &"dark").await?;
//!
//! let theme: Option<String> = local_store::get_json(pool, local_store::KEY_THEME).await?;
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::error::Result;

// Key constants
/// Serialized catalog snapshot (array of tracks)
pub const KEY_SONGS_CACHE: &str = "vaultify_songs_cache";

/// When the catalog snapshot was fetched (milliseconds since epoch)
pub const KEY_SONGS_CACHE_TIME: &str = "vaultify_songs_cache_time";

/// Serialized playlists, including favorites and recently played
pub const KEY_PLAYLISTS: &str = "vaultify_playlists";

/// Login flag set by the auth gate
pub const KEY_AUTH: &str = "vaultify_auth";

/// Light/dark theme preference
pub const KEY_THEME: &str = "theme";

/// Accent color preference
pub const KEY_THEME_COLOR: &str = "theme_color";

/// Visual style preference
pub const KEY_THEME_STYLE: &str = "theme_style";

/// Read the raw JSON text stored under `key`
pub async fn get_raw(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT value FROM local_store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get::<String, _>("value")))
}

/// Read and deserialize the value stored under `key`
///
/// Returns `Ok(None)` when the key is absent. A value that does not parse
/// as `T` is an error.
pub async fn get_json<T: DeserializeOwned>(pool: &SqlitePool, key: &str) -> Result<Option<T>> {
    match get_raw(pool, key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and store it under `key`, replacing any previous value
pub async fn set_json<T: Serialize + ?Sized>(pool: &SqlitePool, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    let now = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        "INSERT INTO local_store (key, value, updated_at)
         VALUES (?, ?, ?)
         ON CONFLICT(key)
         DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
    )
    .bind(key)
    .bind(raw)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove `key`; returns whether anything was deleted
pub async fn delete(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM local_store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All stored keys, sorted
pub async fn keys(pool: &SqlitePool) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT key FROM local_store ORDER BY key")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|r| r.get::<String, _>("key")).collect())
}
