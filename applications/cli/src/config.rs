/// CLI configuration
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use vaultify_playback::PlaybackConfig;
use vaultify_server_client::ServerConfig;
use vaultify_storage::CatalogCacheConfig;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub playback: PlaybackSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_server_url")]
    pub url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CatalogSettings {
    /// How long a fetched catalog stays fresh
    #[serde(default = "default_staleness_secs")]
    pub staleness_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_volume")]
    pub default_volume: u8,

    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: f64,

    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `config.toml` is read when
    /// present. `VAULTIFY_*` variables override both, with `__` between
    /// section and key (`VAULTIFY_SERVER__URL`).
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Same as [`AppConfig::load`], reading variables from `env` instead of
    /// the process environment when given
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("VAULTIFY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "server.url is required (set VAULTIFY_SERVER__URL)".to_string(),
            ));
        }

        let url = url::Url::parse(&self.server.url)
            .map_err(|e| ConfigError::Invalid(format!("server.url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::Invalid(format!(
                "server.url must use http or https, got {}",
                url.scheme()
            )));
        }

        if self.catalog.staleness_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.staleness_secs must be greater than 0".to_string(),
            ));
        }

        if self.playback.default_volume > 100 {
            return Err(ConfigError::Invalid(format!(
                "playback.default_volume must be 0-100, got {}",
                self.playback.default_volume
            )));
        }

        Ok(())
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.url.clone()).with_timeout(self.server.timeout_secs)
    }

    pub fn catalog_config(&self) -> CatalogCacheConfig {
        CatalogCacheConfig::from_secs(self.catalog.staleness_secs)
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            history_size: self.playback.history_size,
            volume: self.playback.default_volume,
            restart_threshold_secs: self.playback.restart_threshold_secs,
            ..PlaybackConfig::default()
        }
    }
}

// Default values
impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite://vaultify.db".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            staleness_secs: default_staleness_secs(),
        }
    }
}

fn default_staleness_secs() -> u64 {
    300
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            restart_threshold_secs: default_restart_threshold_secs(),
            history_size: default_history_size(),
        }
    }
}

fn default_volume() -> u8 {
    70
}

fn default_restart_threshold_secs() -> f64 {
    3.0
}

fn default_history_size() -> usize {
    500
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
