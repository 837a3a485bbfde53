//! Auto-generated collections
//!
//! Groups the catalog by genre, primary artist and album. Groups keep the
//! order in which their first track appears in the catalog.

use std::collections::HashMap;
use vaultify_core::{slugify, Playlist, Track};

/// Smallest group that becomes a collection
const MIN_GROUP_SIZE: usize = 2;

/// An artist credited this often gets a collection even with one primary track
const MIN_ARTIST_CREDITS: usize = 5;

/// Tracks grouped by key, in first-seen order
struct Groups {
    order: Vec<String>,
    members: HashMap<String, Vec<Track>>,
}

impl Groups {
    fn new() -> Self {
        Self {
            order: Vec::new(),
            members: HashMap::new(),
        }
    }

    fn add(&mut self, key: &str, track: &Track) {
        let members = self.members.entry(key.to_string()).or_insert_with(|| {
            self.order.push(key.to_string());
            Vec::new()
        });
        members.push(track.clone());
    }

    fn into_ordered(mut self) -> Vec<(String, Vec<Track>)> {
        self.order
            .into_iter()
            .filter_map(|key| self.members.remove(&key).map(|songs| (key, songs)))
            .collect()
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Build genre, artist and album collections for `catalog`
///
/// `existing` supplies covers for collections that already had one.
pub(super) fn generate(catalog: &[Track], existing: &[Playlist]) -> Vec<Playlist> {
    let covers: HashMap<&str, &str> = existing
        .iter()
        .filter(|p| p.is_auto)
        .filter_map(|p| p.cover_url.as_deref().map(|cover| (p.id.as_str(), cover)))
        .collect();

    let collection = |prefix: &str, label: &str, key: String, songs: Vec<Track>| {
        let id = format!("{}-{}", prefix, slugify(&key));
        let cover_url = covers
            .get(id.as_str())
            .map(|cover| (*cover).to_string())
            .or_else(|| songs.first().and_then(|t| t.cover_url.clone()));
        Playlist {
            name: format!("{}: {}", label, key),
            id,
            songs,
            is_auto: true,
            cover_url,
            kind: None,
        }
    };

    let mut genres = Groups::new();
    let mut artists = Groups::new();
    let mut albums = Groups::new();
    let mut credits: HashMap<String, usize> = HashMap::new();

    for track in catalog {
        if let Some(genre) = trimmed(track.genre.as_deref()) {
            genres.add(genre, track);
        }

        if let Some(artist) = trimmed(track.artist.as_deref()) {
            let names: Vec<&str> = artist.split(',').map(str::trim).collect();
            for name in &names {
                *credits.entry((*name).to_string()).or_default() += 1;
            }
            artists.add(names[0], track);
        }

        if let Some(album) = trimmed(track.album.as_deref()) {
            albums.add(album, track);
        }
    }

    let mut playlists = Vec::new();

    for (genre, songs) in genres.into_ordered() {
        if songs.len() >= MIN_GROUP_SIZE {
            playlists.push(collection("genre", "Genre", genre, songs));
        }
    }

    for (artist, songs) in artists.into_ordered() {
        let credited = credits.get(&artist).copied().unwrap_or(0);
        if songs.len() >= MIN_GROUP_SIZE || credited >= MIN_ARTIST_CREDITS {
            playlists.push(collection("artist", "Artist", artist, songs));
        }
    }

    for (album, songs) in albums.into_ordered() {
        if songs.len() >= MIN_GROUP_SIZE {
            playlists.push(collection("album", "Album", album, songs));
        }
    }

    playlists
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(name: &str) -> Track {
        Track::new(format!("{}.mp3", name), format!("https://cdn.test/{}.mp3", name))
    }

    fn ids(playlists: &[Playlist]) -> Vec<&str> {
        playlists.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn singleton_groups_are_skipped() {
        let catalog = vec![
            track("a").with_genre("Jazz"),
            track("b").with_genre("Jazz"),
            track("c").with_genre("Polka"),
        ];
        let playlists = generate(&catalog, &[]);
        assert_eq!(ids(&playlists), vec!["genre-jazz"]);
        assert_eq!(playlists[0].name, "Genre: Jazz");
        assert_eq!(playlists[0].songs.len(), 2);
        assert!(playlists[0].is_auto);
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let catalog = vec![
            track("a").with_album("Zeta"),
            track("b").with_album("Alpha"),
            track("c").with_album("Zeta"),
            track("d").with_album("Alpha"),
        ];
        assert_eq!(
            ids(&generate(&catalog, &[])),
            vec!["album-zeta", "album-alpha"]
        );
    }

    #[test]
    fn artists_group_by_primary_credit() {
        let catalog = vec![
            track("a").with_artist("Ada, Bo"),
            track("b").with_artist("Ada"),
            track("c").with_artist("Bo"),
        ];
        let playlists = generate(&catalog, &[]);
        assert_eq!(ids(&playlists), vec!["artist-ada"]);
        assert_eq!(playlists[0].songs.len(), 2);
    }

    #[test]
    fn heavily_credited_artist_gets_collection() {
        let mut catalog = vec![track("solo").with_artist("Cy")];
        for i in 0..4 {
            catalog.push(track(&format!("feat{}", i)).with_artist(format!("Host{}, Cy", i)));
        }
        let playlists = generate(&catalog, &[]);
        assert!(ids(&playlists).contains(&"artist-cy"));
    }

    #[test]
    fn multi_word_names_are_slugged() {
        let catalog = vec![
            track("a").with_genre("Hip Hop"),
            track("b").with_genre(" Hip Hop "),
        ];
        assert_eq!(ids(&generate(&catalog, &[])), vec!["genre-hip-hop"]);
    }

    #[test]
    fn covers_prefer_existing_then_first_track() {
        let catalog = vec![
            track("a").with_album("Blue").with_cover_url("https://x/a.jpg"),
            track("b").with_album("Blue").with_cover_url("https://x/b.jpg"),
            track("c").with_genre("Jazz"),
            track("d").with_genre("Jazz"),
        ];

        let fresh = generate(&catalog, &[]);
        let album = fresh.iter().find(|p| p.id == "album-blue").unwrap();
        assert_eq!(album.cover_url.as_deref(), Some("https://x/a.jpg"));

        let mut previous = album.clone();
        previous.cover_url = Some("https://x/custom.jpg".to_string());
        let again = generate(&catalog, &[previous]);
        let album = again.iter().find(|p| p.id == "album-blue").unwrap();
        assert_eq!(album.cover_url.as_deref(), Some("https://x/custom.jpg"));

        let genre = again.iter().find(|p| p.id == "genre-jazz").unwrap();
        assert_eq!(genre.cover_url, None);
    }
}
