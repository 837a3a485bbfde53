//! Vaultify command-line front end
//!
//! Wires the storage backend client, the local store and the playback
//! engine together behind a handful of subcommands.

pub mod commands;
pub mod config;

pub use commands::App;
pub use config::{AppConfig, ConfigError};
