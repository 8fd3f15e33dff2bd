//! Content view state: what the main area shows and where the cursor is

use super::catalog::{Album, Artist, Playlist, Radio};
use super::playback::Track;

/// Sections of the Home view, cycled with the section keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HomeSection {
    #[default]
    ListenAgain,
    Artists,
    Albums,
    Radios,
    Playlists,
}

impl HomeSection {
    pub fn next(self) -> Self {
        match self {
            Self::ListenAgain => Self::Artists,
            Self::Artists => Self::Albums,
            Self::Albums => Self::Radios,
            Self::Radios => Self::Playlists,
            Self::Playlists => Self::ListenAgain,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::ListenAgain => Self::Playlists,
            Self::Artists => Self::ListenAgain,
            Self::Albums => Self::Artists,
            Self::Radios => Self::Albums,
            Self::Playlists => Self::Radios,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::ListenAgain => "Listen again",
            Self::Artists => "Similar to",
            Self::Albums => "Albums for you",
            Self::Radios => "Radios for you",
            Self::Playlists => "Featured playlists",
        }
    }
}

/// Which section of search results is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SearchSection {
    #[default]
    Tracks,
    Artists,
    Albums,
    Playlists,
}

impl SearchSection {
    pub fn next(self) -> Self {
        match self {
            Self::Tracks => Self::Artists,
            Self::Artists => Self::Albums,
            Self::Albums => Self::Playlists,
            Self::Playlists => Self::Tracks,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Tracks => Self::Playlists,
            Self::Artists => Self::Tracks,
            Self::Albums => Self::Artists,
            Self::Playlists => Self::Albums,
        }
    }
}

/// Cross-entity search results filtered for one query.
#[derive(Clone, Debug, Default)]
pub struct SearchResults {
    pub query: String,
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub playlists: Vec<Playlist>,
    pub best_match: SearchSection,
}

impl SearchResults {
    /// Score each category by how well its top result matches the query and
    /// pick the best section to land on. Artists win exact-name matches,
    /// tracks are the general default.
    pub fn determine_best_match(&mut self) {
        let query = self.query.to_lowercase();

        let score_name = |name: &str, exact: u32, prefix: u32, contains: u32| {
            let name = name.to_lowercase();
            if name == query {
                exact
            } else if name.starts_with(&query) {
                prefix
            } else if name.contains(&query) {
                contains
            } else {
                0
            }
        };

        let artist_score = self
            .artists
            .first()
            .map(|a| score_name(&a.name, 100, 80, 60))
            .unwrap_or(0);
        let track_score = self
            .tracks
            .first()
            .map(|t| {
                score_name(&t.title, 95, 75, 55).max(score_name(&t.artist, 95, 75, 55))
            })
            .unwrap_or(0);
        let album_score = self
            .albums
            .first()
            .map(|a| score_name(&a.name, 85, 65, 45))
            .unwrap_or(0);
        let playlist_score = self
            .playlists
            .first()
            .map(|p| score_name(&p.name, 80, 60, 40))
            .unwrap_or(0);

        let max_score = artist_score
            .max(track_score)
            .max(album_score)
            .max(playlist_score);

        self.best_match = if max_score == 0 {
            if !self.tracks.is_empty() {
                SearchSection::Tracks
            } else if !self.artists.is_empty() {
                SearchSection::Artists
            } else if !self.albums.is_empty() {
                SearchSection::Albums
            } else {
                SearchSection::Playlists
            }
        } else if artist_score == max_score {
            SearchSection::Artists
        } else if track_score == max_score {
            SearchSection::Tracks
        } else if album_score == max_score {
            SearchSection::Albums
        } else {
            SearchSection::Playlists
        };
    }
}

/// Sections within the artist detail view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArtistSection {
    #[default]
    PopularTracks,
    AllTracks,
    Albums,
}

impl ArtistSection {
    pub fn next(self) -> Self {
        match self {
            Self::PopularTracks => Self::AllTracks,
            Self::AllTracks => Self::Albums,
            Self::Albums => Self::PopularTracks,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::PopularTracks => Self::Albums,
            Self::AllTracks => Self::PopularTracks,
            Self::Albums => Self::AllTracks,
        }
    }
}

/// Artist detail view data.
#[derive(Clone, Debug)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub popular_tracks: Vec<Track>,
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
}

/// Album detail view data.
#[derive(Clone, Debug)]
pub struct AlbumDetail {
    pub album: Album,
    pub tracks: Vec<Track>,
}

/// Playlist detail view data.
#[derive(Clone, Debug)]
pub struct PlaylistDetail {
    pub playlist: Playlist,
    pub tracks: Vec<Track>,
}

/// The current view in the main content area.
#[derive(Clone, Debug)]
pub enum ContentView {
    Home {
        section: HomeSection,
        song_index: usize,
        artist_index: usize,
        album_index: usize,
        radio_index: usize,
        playlist_index: usize,
    },
    AllSongs {
        selected_index: usize,
    },
    Radios {
        radios: Vec<Radio>,
        selected_index: usize,
    },
    Favorites {
        tracks: Vec<Track>,
        selected_index: usize,
    },
    ArtistDetail {
        detail: ArtistDetail,
        section: ArtistSection,
        popular_index: usize,
        track_index: usize,
        album_index: usize,
    },
    AlbumDetail {
        detail: AlbumDetail,
        selected_index: usize,
    },
    PlaylistDetail {
        detail: PlaylistDetail,
        selected_index: usize,
    },
    SearchResults {
        results: SearchResults,
        section: SearchSection,
        track_index: usize,
        artist_index: usize,
        album_index: usize,
        playlist_index: usize,
    },
}

impl Default for ContentView {
    fn default() -> Self {
        ContentView::Home {
            section: HomeSection::default(),
            song_index: 0,
            artist_index: 0,
            album_index: 0,
            radio_index: 0,
            playlist_index: 0,
        }
    }
}

/// State for the main content area.
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    pub is_loading: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(title: &str, artist: &str) -> Track {
        Track {
            id: title.to_string(),
            title: title.to_string(),
            artist_id: "ar".to_string(),
            artist: artist.to_string(),
            album_id: None,
            album: None,
            duration_secs: 60,
            media_url: String::new(),
            artwork_url: String::new(),
            views: 0,
        }
    }

    fn artist(name: &str) -> Artist {
        Artist {
            id: name.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// An exact artist-name match outranks a partial track match.
    #[test]
    fn best_match_prefers_exact_artist() {
        let mut results = SearchResults {
            query: "coldwave".to_string(),
            tracks: vec![track("coldwave nights", "someone")],
            artists: vec![artist("Coldwave")],
            ..Default::default()
        };
        results.determine_best_match();
        assert_eq!(results.best_match, SearchSection::Artists);
    }

    /// With no artist hit the track section wins its own matches.
    #[test]
    fn best_match_falls_to_tracks() {
        let mut results = SearchResults {
            query: "midnight".to_string(),
            tracks: vec![track("Midnight", "someone")],
            artists: vec![artist("Unrelated")],
            ..Default::default()
        };
        results.determine_best_match();
        assert_eq!(results.best_match, SearchSection::Tracks);
    }

    /// No scores at all defaults to the first non-empty section.
    #[test]
    fn best_match_defaults_on_no_hits() {
        let mut results = SearchResults {
            query: "zzz".to_string(),
            artists: vec![artist("Unrelated")],
            ..Default::default()
        };
        results.determine_best_match();
        assert_eq!(results.best_match, SearchSection::Artists);
    }
}
