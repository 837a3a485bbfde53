//! Auto-continuation picks
//!
//! Once the explicit queue is empty the engine keeps music going: first a
//! random track from the current album, then a random track from the whole
//! catalog.

use rand::seq::SliceRandom;
use rand::Rng;
use vaultify_core::Track;

/// Tracks from `catalog` on the same album as `current`, excluding `current`
pub fn same_album<'a>(catalog: &'a [Track], current: &Track) -> Vec<&'a Track> {
    catalog
        .iter()
        .filter(|track| track.file_name != current.file_name && track.shares_album_with(current))
        .collect()
}

/// Uniformly random same-album track, if any
pub fn pick_same_album<R: Rng + ?Sized>(
    catalog: &[Track],
    current: &Track,
    rng: &mut R,
) -> Option<Track> {
    same_album(catalog, current)
        .choose(rng)
        .map(|track| (*track).clone())
}

/// Uniformly random track from the whole catalog
///
/// May return the current track; the library fallback does not exclude it.
pub fn pick_any<R: Rng + ?Sized>(catalog: &[Track], rng: &mut R) -> Option<Track> {
    catalog.choose(rng).cloned()
}
