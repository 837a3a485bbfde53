mod playlist;
mod track;

pub use playlist::{slugify, Playlist, FAVORITES_ID, RECENTLY_PLAYED_ID};
pub use track::Track;
