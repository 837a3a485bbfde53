/// Vaultify - personal music library from the command line
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vaultify_cli::{App, AppConfig};

#[derive(Parser)]
#[command(name = "vaultify")]
#[command(about = "Browse, play and upload your Vaultify library", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VAULTIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the catalog
    Library {
        /// Refetch even if the cached catalog is fresh
        #[arg(long)]
        refresh: bool,
    },
    /// List favorite tracks
    Favorites,
    /// List recently played tracks, newest first
    Recent,
    /// Add or remove a track from favorites
    Favorite {
        /// Stored file name of the track
        file_name: String,
    },
    /// Start a track and record it as played
    Play {
        /// Stored file name of the track
        file_name: String,
    },
    /// Remote metadata lookup
    Metadata {
        #[command(subcommand)]
        command: MetadataCommands,
    },
    /// Upload a local audio file
    Upload {
        /// Path to the audio file
        path: PathBuf,
    },
    /// Have the server fetch audio from a URL
    UploadUrl {
        /// Source URL
        url: String,
    },
    /// List playlists and generated collections
    Playlists,
}

#[derive(Subcommand)]
enum MetadataCommands {
    /// Search candidate metadata for a stored file
    Search {
        /// Stored file name of the track
        file_name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.validate()?;

    // Initialize tracing
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("vaultify={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(server = %config.server.url, "Configuration loaded");

    let app = App::open(config).await?;

    match cli.command {
        Commands::Library { refresh } => app.library(refresh).await?,
        Commands::Favorites => app.favorites().await?,
        Commands::Recent => app.recent().await?,
        Commands::Favorite { file_name } => app.toggle_favorite(&file_name).await?,
        Commands::Play { file_name } => app.play(&file_name).await?,
        Commands::Metadata {
            command: MetadataCommands::Search { file_name },
        } => app.search_metadata(&file_name).await?,
        Commands::Upload { path } => app.upload(&path).await?,
        Commands::UploadUrl { url } => app.upload_from_url(&url).await?,
        Commands::Playlists => app.playlists().await?,
    }

    Ok(())
}
