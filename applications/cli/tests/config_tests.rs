//! Configuration loading from files and environment overrides

use std::io::Write;
use tempfile::NamedTempFile;
use vaultify_cli::{App, AppConfig, ConfigError};

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn env(vars: &[(&str, &str)]) -> Option<config::Map<String, String>> {
    Some(
        vars.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
    )
}

#[test]
fn test_file_values_override_defaults() {
    let file = config_file(
        r#"
[server]
url = "https://music.example.com"

[catalog]
staleness_secs = 60
"#,
    );

    let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.server.url, "https://music.example.com");
    assert_eq!(config.server.timeout_secs, 30);
    assert_eq!(config.catalog.staleness_secs, 60);
    assert_eq!(config.playback.default_volume, 70);
    assert_eq!(config.storage.database_url, "sqlite://vaultify.db");
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file(
        r#"
[server]
url = "https://music.example.com"
"#,
    );

    let config = AppConfig::load_with_env(
        Some(file.path()),
        env(&[
            ("VAULTIFY_SERVER__URL", "http://10.0.0.2:3000"),
            ("VAULTIFY_PLAYBACK__DEFAULT_VOLUME", "40"),
        ]),
    )
    .unwrap();

    assert_eq!(config.server.url, "http://10.0.0.2:3000");
    assert_eq!(config.playback.default_volume, 40);
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let result = AppConfig::load_with_env(
        Some(std::path::Path::new("/definitely/not/here.toml")),
        env(&[]),
    );
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_invalid_values_fail_validation() {
    let file = config_file(
        r#"
[catalog]
staleness_secs = 0
"#,
    );

    let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[tokio::test]
async fn test_app_opens_fresh_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.storage.database_url = format!("sqlite://{}", dir.path().join("cli.db").display());

    let app = App::open(config).await.unwrap();

    // Listing the ledger works without touching the network
    app.favorites().await.unwrap();
    app.recent().await.unwrap();
}
