//! Queue resolution: one interface mapping "where the click happened" to an
//! ordered track list for the playback session.

use super::catalog::{Catalog, Radio};
use super::playback::Track;

/// The browsing context a play action was initiated from.
///
/// Every view resolves its clicks through this enum instead of carrying its
/// own filtering logic, so the playback session contract stays uniform: a
/// track plus the ordered list it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayContext {
    /// An album's track listing, in album order.
    Album(String),
    /// A playlist's track listing, in playlist order.
    Playlist(String),
    /// Everything by one artist, in catalog order.
    Artist(String),
    /// The full song catalog.
    Catalog,
    /// The radio list, rendered as endless tracks.
    Radios,
}

impl PlayContext {
    /// Resolve this context to its ordered queue against the catalog cache.
    pub fn resolve(&self, catalog: &Catalog) -> Vec<Track> {
        match self {
            PlayContext::Album(id) => catalog.tracks_for_album(id),
            PlayContext::Playlist(id) => catalog.tracks_for_playlist(id),
            PlayContext::Artist(id) => catalog.tracks_for_artist(id),
            PlayContext::Catalog => catalog.songs.clone(),
            PlayContext::Radios => catalog.radios.iter().map(radio_track).collect(),
        }
    }
}

/// A radio stream seen as a playable track: zero duration, stream URL as
/// media locator.
pub fn radio_track(radio: &Radio) -> Track {
    Track {
        id: radio.id.clone(),
        title: radio.name.clone(),
        artist_id: String::new(),
        artist: radio.description.clone(),
        album_id: None,
        album: None,
        duration_secs: 0,
        media_url: radio.stream_url.clone(),
        artwork_url: radio.cover_image.clone(),
        views: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{Album, Playlist};

    fn song(id: &str, artist_id: &str, album_id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("song {id}"),
            artist_id: artist_id.to_string(),
            artist: "artist".to_string(),
            album_id: Some(album_id.to_string()),
            album: None,
            duration_secs: 60,
            media_url: String::new(),
            artwork_url: String::new(),
            views: 0,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            songs: vec![
                song("s1", "ar1", "al1"),
                song("s2", "ar2", "al2"),
                song("s3", "ar1", "al1"),
            ],
            albums: vec![Album {
                id: "al1".to_string(),
                artist_id: "ar1".to_string(),
                song_ids: vec!["s3".to_string(), "s1".to_string()],
                ..Default::default()
            }],
            playlists: vec![Playlist {
                id: "p1".to_string(),
                tracks: vec![song("s2", "ar2", "al2"), song("s1", "ar1", "al1")],
                ..Default::default()
            }],
            radios: vec![Radio {
                id: "r1".to_string(),
                name: "night radio".to_string(),
                stream_url: "http://radio.local/stream".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn album_context_uses_album_order() {
        let ids: Vec<String> = PlayContext::Album("al1".to_string())
            .resolve(&catalog())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s3", "s1"]);
    }

    #[test]
    fn playlist_context_uses_playlist_order() {
        let ids: Vec<String> = PlayContext::Playlist("p1".to_string())
            .resolve(&catalog())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s2", "s1"]);
    }

    #[test]
    fn artist_context_filters_catalog_order() {
        let ids: Vec<String> = PlayContext::Artist("ar1".to_string())
            .resolve(&catalog())
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    #[test]
    fn catalog_context_is_every_song() {
        let tracks = PlayContext::Catalog.resolve(&catalog());
        assert_eq!(tracks.len(), 3);
    }

    /// Radios resolve as zero-duration stream tracks.
    #[test]
    fn radios_context_maps_streams() {
        let tracks = PlayContext::Radios.resolve(&catalog());
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].duration_secs, 0);
        assert_eq!(tracks[0].media_url, "http://radio.local/stream");
    }

    /// An unknown id resolves to an empty queue; the session's single-track
    /// fallback covers the rest.
    #[test]
    fn unknown_ids_resolve_empty() {
        assert!(PlayContext::Album("missing".to_string())
            .resolve(&catalog())
            .is_empty());
        assert!(PlayContext::Playlist("missing".to_string())
            .resolve(&catalog())
            .is_empty());
    }
}
