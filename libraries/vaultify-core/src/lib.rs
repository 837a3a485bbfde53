//! Vaultify Core
//!
//! Platform-agnostic core types, traits, and error handling for Vaultify.
//!
//! This crate provides the foundational building blocks shared by the
//! playback engine, the local store, the HTTP collaborator client and the
//! transport surface.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`
//! - **Core Traits**: `TrackCatalogSource` (where the catalog comes from)
//! - **Error Handling**: Unified `VaultifyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use vaultify_core::Track;
//!
//! let a = Track::new("intro.mp3", "https://cdn.example/intro.mp3").with_album("Blue");
//! let b = Track::new("outro.mp3", "https://cdn.example/outro.mp3").with_album("  BLUE ");
//!
//! assert!(a.shares_album_with(&b));
//! assert_ne!(a, b);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, VaultifyError};
pub use traits::TrackCatalogSource;
pub use types::{slugify, Playlist, Track, FAVORITES_ID, RECENTLY_PLAYED_ID};
