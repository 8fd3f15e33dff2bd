//! Catalog client cache: normalized read-only copies of the backend collections

use chrono::NaiveDate;

use super::api_client::ApiClient;
use super::playback::Track;

/// An artist as served by the catalog.
#[derive(Clone, Debug, Default)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub genre: String,
    pub profile_image: String,
    pub cover_image: String,
    pub bio: String,
}

/// An album with its track listing (ids in album order).
#[derive(Clone, Debug, Default)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub artist: String,
    pub cover_image: String,
    pub release_date: Option<NaiveDate>,
    pub genre: String,
    pub description: String,
    pub song_ids: Vec<String>,
}

/// A radio stream; playable but without a fixed duration.
#[derive(Clone, Debug, Default)]
pub struct Radio {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover_image: String,
    pub stream_url: String,
}

/// A playlist with its fully-resolved tracks in playlist order.
#[derive(Clone, Debug, Default)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover_image: String,
    pub owner: String,
    pub tracks: Vec<Track>,
}

/// A favorite row linking a user to a song.
#[derive(Clone, Debug)]
pub struct Favorite {
    pub id: String,
    pub user_id: i64,
    pub song_id: String,
}

/// In-memory snapshot of the catalog collections.
///
/// Collections are keyed by stable string ids, unique within a collection
/// for the session lifetime. Each collection is fetched independently; a
/// failed fetch leaves that collection empty without blocking the others.
#[derive(Debug, Default)]
pub struct Catalog {
    pub songs: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub radios: Vec<Radio>,
    pub playlists: Vec<Playlist>,
    pub favorites: Vec<Favorite>,
}

/// Unwrap a collection fetch, logging and substituting empty on failure.
fn or_empty<T>(result: anyhow::Result<Vec<T>>, collection: &str) -> Vec<T> {
    match result {
        Ok(items) => {
            tracing::info!(collection, count = items.len(), "catalog collection loaded");
            items
        }
        Err(e) => {
            tracing::warn!(collection, error = %e, "catalog collection failed to load, using empty");
            Vec::new()
        }
    }
}

impl Catalog {
    /// Fetch every collection concurrently and independently.
    ///
    /// Favorites are only fetched when a user is signed in; pass `false`
    /// to skip them (guest mode).
    pub async fn load(api: &ApiClient, with_favorites: bool) -> Self {
        let (songs, artists, albums, radios, playlists) = futures::join!(
            api.list_songs(),
            api.list_artists(),
            api.list_albums(),
            api.list_radios(),
            api.list_playlists(),
        );

        let favorites = if with_favorites {
            or_empty(api.list_favorites().await, "favorites")
        } else {
            Vec::new()
        };

        Self {
            songs: or_empty(songs, "songs"),
            artists: or_empty(artists, "artists"),
            albums: or_empty(albums, "albums"),
            radios: or_empty(radios, "radios"),
            playlists: or_empty(playlists, "playlists"),
            favorites,
        }
    }

    /// Refetch the favorites collection after a toggle.
    pub async fn refresh_favorites(&mut self, api: &ApiClient) {
        self.favorites = or_empty(api.list_favorites().await, "favorites");
    }

    pub fn song(&self, id: &str) -> Option<&Track> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn artist(&self, id: &str) -> Option<&Artist> {
        self.artists.iter().find(|a| a.id == id)
    }

    pub fn album(&self, id: &str) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn playlist(&self, id: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    /// Tracks of an album, in the album's own order where the payload
    /// provided one, falling back to catalog order filtered by album id.
    pub fn tracks_for_album(&self, album_id: &str) -> Vec<Track> {
        if let Some(album) = self.album(album_id) {
            if !album.song_ids.is_empty() {
                return album
                    .song_ids
                    .iter()
                    .filter_map(|id| self.song(id).cloned())
                    .collect();
            }
        }
        self.songs
            .iter()
            .filter(|s| s.album_id.as_deref() == Some(album_id))
            .cloned()
            .collect()
    }

    /// All tracks by an artist, in catalog order.
    pub fn tracks_for_artist(&self, artist_id: &str) -> Vec<Track> {
        self.songs
            .iter()
            .filter(|s| s.artist_id == artist_id)
            .cloned()
            .collect()
    }

    /// An artist's tracks sorted by view count, most viewed first.
    pub fn popular_tracks_for_artist(&self, artist_id: &str) -> Vec<Track> {
        let mut tracks = self.tracks_for_artist(artist_id);
        tracks.sort_by(|a, b| b.views.cmp(&a.views));
        tracks
    }

    /// Albums by an artist, in catalog order.
    pub fn albums_for_artist(&self, artist_id: &str) -> Vec<Album> {
        self.albums
            .iter()
            .filter(|a| a.artist_id == artist_id)
            .cloned()
            .collect()
    }

    /// Tracks of a playlist, in playlist order.
    pub fn tracks_for_playlist(&self, playlist_id: &str) -> Vec<Track> {
        self.playlist(playlist_id)
            .map(|p| p.tracks.clone())
            .unwrap_or_default()
    }

    /// The favorite row for a user/song pair, if any.
    pub fn favorite_entry(&self, user_id: i64, song_id: &str) -> Option<&Favorite> {
        self.favorites
            .iter()
            .find(|f| f.user_id == user_id && f.song_id == song_id)
    }

    pub fn is_favorite(&self, user_id: i64, song_id: &str) -> bool {
        self.favorite_entry(user_id, song_id).is_some()
    }

    /// The signed-in user's favorite songs, resolved against the song
    /// collection in favorites order.
    pub fn favorite_tracks(&self, user_id: i64) -> Vec<Track> {
        self.favorites
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| self.song(&f.song_id).cloned())
            .collect()
    }

    /// Patch a song's view count in place after an increment call.
    pub fn apply_view_count(&mut self, song_id: &str, views: u64) {
        if let Some(song) = self.songs.iter_mut().find(|s| s.id == song_id) {
            song.views = views;
        }
        for playlist in &mut self.playlists {
            if let Some(track) = playlist.tracks.iter_mut().find(|t| t.id == song_id) {
                track.views = views;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(id: &str, artist_id: &str, album_id: &str, views: u64) -> Track {
        Track {
            id: id.to_string(),
            title: format!("song {id}"),
            artist_id: artist_id.to_string(),
            artist: "artist".to_string(),
            album_id: Some(album_id.to_string()),
            album: Some("album".to_string()),
            duration_secs: 120,
            media_url: String::new(),
            artwork_url: String::new(),
            views,
        }
    }

    fn catalog() -> Catalog {
        Catalog {
            songs: vec![
                song("s1", "ar1", "al1", 5),
                song("s2", "ar2", "al2", 50),
                song("s3", "ar1", "al1", 20),
            ],
            albums: vec![Album {
                id: "al1".to_string(),
                artist_id: "ar1".to_string(),
                // album order differs from catalog order on purpose
                song_ids: vec!["s3".to_string(), "s1".to_string()],
                ..Default::default()
            }],
            favorites: vec![Favorite {
                id: "f1".to_string(),
                user_id: 7,
                song_id: "s2".to_string(),
            }],
            ..Default::default()
        }
    }

    /// Album tracks come back in the album's own order.
    #[test]
    fn album_tracks_preserve_album_order() {
        let c = catalog();
        let tracks = c.tracks_for_album("al1");
        let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["s3", "s1"]);
    }

    /// An album without a provided listing falls back to the song filter.
    #[test]
    fn album_tracks_fall_back_to_filter() {
        let mut c = catalog();
        c.albums[0].song_ids.clear();
        let ids: Vec<String> = c
            .tracks_for_album("al1")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s1", "s3"]);
    }

    /// Artist filtering keeps catalog order; popularity sorts by views.
    #[test]
    fn artist_tracks_and_popularity() {
        let c = catalog();
        let ids: Vec<String> = c
            .tracks_for_artist("ar1")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["s1", "s3"]);

        let popular: Vec<String> = c
            .popular_tracks_for_artist("ar1")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(popular, vec!["s3", "s1"]);
    }

    /// Favorite lookups are scoped by user.
    #[test]
    fn favorites_scoped_by_user() {
        let c = catalog();
        assert!(c.is_favorite(7, "s2"));
        assert!(!c.is_favorite(7, "s1"));
        assert!(!c.is_favorite(8, "s2"));
        let favs: Vec<String> = c.favorite_tracks(7).into_iter().map(|t| t.id).collect();
        assert_eq!(favs, vec!["s2"]);
    }

    /// View-count patches reach the song collection.
    #[test]
    fn view_count_applies_in_place() {
        let mut c = catalog();
        c.apply_view_count("s1", 6);
        assert_eq!(c.song("s1").map(|s| s.views), Some(6));
    }
}
