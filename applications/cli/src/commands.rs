//! Subcommand implementations

use crate::config::AppConfig;
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;
use vaultify_core::Track;
use vaultify_playback::{NullOutput, PlaybackEngine};
use vaultify_server_client::VaultifyClient;
use vaultify_storage::{ledger, CatalogCache, Ledger};
use vaultify_transport::{format_time, TransportSurface};

/// Everything a subcommand needs
pub struct App {
    config: AppConfig,
    pool: SqlitePool,
    client: VaultifyClient,
}

impl App {
    /// Open the local store and build the backend client
    pub async fn open(config: AppConfig) -> Result<Self> {
        let pool = vaultify_storage::create_pool(&config.storage.database_url)
            .await
            .with_context(|| format!("opening {}", config.storage.database_url))?;
        vaultify_storage::run_migrations(&pool)
            .await
            .context("running migrations")?;

        let client =
            VaultifyClient::new(config.server_config()).context("building server client")?;

        Ok(Self {
            config,
            pool,
            client,
        })
    }

    async fn catalog_cache(&self) -> Result<CatalogCache<VaultifyClient>> {
        let cache = CatalogCache::load(
            self.pool.clone(),
            self.client.clone(),
            self.config.catalog_config(),
        )
        .await?;
        Ok(cache)
    }

    async fn catalog(&self) -> Result<Vec<Track>> {
        let mut cache = self.catalog_cache().await?;
        Ok(cache.get_all().await.to_vec())
    }

    async fn find_track(&self, file_name: &str) -> Result<Track> {
        let mut cache = self.catalog_cache().await?;
        cache.get_all().await;
        let track = cache
            .find(file_name)
            .with_context(|| format!("{} is not in the library", file_name))?;
        Ok(track.clone())
    }

    /// `library [--refresh]`
    pub async fn library(&self, refresh: bool) -> Result<()> {
        let mut cache = self.catalog_cache().await?;
        let tracks = if refresh {
            cache.force_refresh().await
        } else {
            cache.get_all().await
        };

        let ledger = ledger::load(&self.pool).await?;
        for track in tracks {
            print_track(track, ledger.is_favorite(&track.file_name));
        }
        println!("{} tracks", tracks.len());
        Ok(())
    }

    /// `favorites`
    pub async fn favorites(&self) -> Result<()> {
        let ledger = ledger::load(&self.pool).await?;
        for track in ledger.favorites() {
            print_track(track, true);
        }
        Ok(())
    }

    /// `recent`
    pub async fn recent(&self) -> Result<()> {
        let ledger = ledger::load(&self.pool).await?;
        for track in ledger.recently_played() {
            print_track(track, ledger.is_favorite(&track.file_name));
        }
        Ok(())
    }

    /// `favorite <file-name>`
    pub async fn toggle_favorite(&self, file_name: &str) -> Result<()> {
        let track = self.find_track(file_name).await?;
        let mut ledger = ledger::load(&self.pool).await?;

        let added = ledger.toggle_favorite(&track);
        ledger::save(&self.pool, &ledger).await?;

        if added {
            println!("Added {} to favorites", track.display_title());
        } else {
            println!("Removed {} from favorites", track.display_title());
        }
        Ok(())
    }

    /// `play <file-name>`
    ///
    /// Binds the track in a headless engine so it goes through the same
    /// bookkeeping as an audible session.
    pub async fn play(&self, file_name: &str) -> Result<()> {
        let catalog = self.catalog().await?;
        let track = catalog
            .iter()
            .find(|t| t.file_name == file_name)
            .cloned()
            .with_context(|| format!("{} is not in the library", file_name))?;

        let mut engine = PlaybackEngine::new(NullOutput::new(), self.config.playback_config());
        engine.set_catalog(catalog);
        let mut ledger = ledger::load(&self.pool).await?;
        let mut surface = TransportSurface::attach(&engine);

        engine.play_track(track);
        surface.sync(&mut engine, &mut ledger);
        ledger::save(&self.pool, &ledger).await?;

        let player = surface.full_player();
        println!(
            "Now playing: {} - {} [{}]",
            player.title(),
            player.artist(),
            format_time(surface.now_playing().position_secs)
        );
        if let Some(url) = engine.current_source_url() {
            println!("Stream: {}", url);
        }
        Ok(())
    }

    /// `metadata search <file-name>`
    pub async fn search_metadata(&self, file_name: &str) -> Result<()> {
        let matches = self.client.library().fetch_metadata(file_name).await?;
        if matches.is_empty() {
            println!("No matches for {}", file_name);
        }
        for found in &matches {
            println!(
                "{}\t{}\t{}\t{}",
                found.display_title(),
                found.display_artist(),
                found.album.as_deref().unwrap_or("-"),
                found.genre.as_deref().unwrap_or("-"),
            );
        }
        Ok(())
    }

    /// `upload <path>`
    pub async fn upload(&self, path: &Path) -> Result<()> {
        let uploaded = self.client.uploads().upload_file(path).await?;
        info!(path = %path.display(), "Upload complete");
        println!(
            "Uploaded {}: {}",
            uploaded.title.as_deref().unwrap_or("(untitled)"),
            uploaded.signed_url
        );
        Ok(())
    }

    /// `upload-url <url>`
    pub async fn upload_from_url(&self, source_url: &str) -> Result<()> {
        let uploaded = self.client.uploads().upload_from_url(source_url).await?;
        println!(
            "Uploaded {}: {}",
            uploaded.title.as_deref().unwrap_or("(untitled)"),
            uploaded.signed_url
        );
        Ok(())
    }

    /// `playlists`
    ///
    /// Regenerates the genre, artist and album collections from the
    /// current catalog before listing.
    pub async fn playlists(&self) -> Result<()> {
        let catalog = self.catalog().await?;
        let mut ledger = ledger::load(&self.pool).await?;
        ledger.regenerate_auto_playlists(&catalog);
        ledger::save(&self.pool, &ledger).await?;

        print_playlists(&ledger);
        Ok(())
    }
}

fn print_track(track: &Track, favorite: bool) {
    println!(
        "{} {}\t{}\t{}",
        if favorite { "*" } else { " " },
        track.file_name,
        track.display_title(),
        track.display_artist(),
    );
}

fn print_playlists(ledger: &Ledger) {
    for playlist in ledger.playlists() {
        println!(
            "{}\t{}\t{} songs{}",
            playlist.id,
            playlist.name,
            playlist.songs.len(),
            if playlist.is_auto { "\t(auto)" } else { "" }
        );
    }
}
