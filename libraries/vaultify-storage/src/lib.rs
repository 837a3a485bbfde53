//! Vaultify Storage
//!
//! Durable client-side state for Vaultify, kept in a local `SQLite` file.
//!
//! # Architecture
//!
//! - **Key/value store**: one table of JSON documents under well-known keys
//!   (`local_store`)
//! - **Catalog cache**: last known track list with a staleness window,
//!   refetched through a `TrackCatalogSource` (`catalog_cache`)
//! - **Ledger**: favorites, recently played, user playlists and
//!   auto-generated collections (`ledger`)
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//!
//! # Example
//!
//! ```rust,no_run
//! use vaultify_storage::{create_pool, ledger, run_migrations};
//! use vaultify_core::Track;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://vaultify.db").await?;
//! run_migrations(&pool).await?;
//!
//! let mut playlists = ledger::load(&pool).await?;
//! playlists.record_play(&Track::new("a.mp3", "https://cdn.example/a.mp3"));
//! ledger::save(&pool, &playlists).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod catalog_cache;
pub mod ledger;
pub mod local_store;

pub use catalog_cache::{CatalogCache, CatalogCacheConfig};
pub use error::{Result, StorageError};
pub use ledger::Ledger;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://vaultify.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}
