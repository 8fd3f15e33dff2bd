//! Library, playlist and search navigation

use crate::model::{LibraryEntry, SearchCatalog, SearchResults, SelectedItem};

use super::AppController;

impl AppController {
    /// Run the backend full-scan search and show the filtered results.
    pub async fn perform_search(&self, query: &str) {
        {
            let mut model = self.model.lock().await;
            model.set_content_loading(true);
        }

        match self.api.search().await {
            Ok(dump) => {
                let mut results = filter_search(dump, query);
                results.determine_best_match();
                tracing::info!(
                    query,
                    tracks = results.tracks.len(),
                    artists = results.artists.len(),
                    albums = results.albums.len(),
                    playlists = results.playlists.len(),
                    "search complete"
                );
                let mut model = self.model.lock().await;
                model.set_search_results(results);
            }
            Err(e) => {
                tracing::error!(query, error = %e, "search failed");
                let mut model = self.model.lock().await;
                model.set_content_loading(false);
                model.set_error(Self::format_error(&e));
            }
        }
    }

    /// Open the library entry under the sidebar cursor.
    pub async fn open_library_entry(&self, entry: LibraryEntry) {
        match entry {
            LibraryEntry::Home => {
                let mut model = self.model.lock().await;
                model.open_home();
            }
            LibraryEntry::AllSongs => {
                let mut model = self.model.lock().await;
                model.open_all_songs();
            }
            LibraryEntry::Radios => {
                let mut model = self.model.lock().await;
                model.open_radios();
            }
            LibraryEntry::Favorites => {
                let user_id = {
                    let auth = self.auth.lock().await;
                    auth.current_user().map(|u| u.user_id)
                };
                let mut model = self.model.lock().await;
                match user_id {
                    Some(user_id) => model.open_favorites(user_id),
                    None => model.set_error("Sign in to see your favorites.".to_string()),
                }
            }
        }
    }

    pub async fn open_artist(&self, artist_id: &str) {
        let mut model = self.model.lock().await;
        if !model.open_artist_detail(artist_id) {
            tracing::warn!(artist_id, "artist not in catalog cache");
            model.set_error("That artist is not in the catalog.".to_string());
        }
    }

    pub async fn open_album(&self, album_id: &str) {
        let mut model = self.model.lock().await;
        if !model.open_album_detail(album_id) {
            tracing::warn!(album_id, "album not in catalog cache");
            model.set_error("That album is not in the catalog.".to_string());
        }
    }

    pub async fn open_playlist(&self, playlist_id: &str) {
        let mut model = self.model.lock().await;
        if !model.open_playlist_detail(playlist_id) {
            tracing::warn!(playlist_id, "playlist not in catalog cache");
            model.set_error("That playlist is not in the catalog.".to_string());
        }
    }

    /// Dispatch an activated item: tracks start playing in their context,
    /// everything else opens its detail view.
    pub async fn handle_selected_item(&self, item: SelectedItem) {
        match item {
            SelectedItem::Track { track, context } => self.play_track(track, context).await,
            SelectedItem::Artist { id } => self.open_artist(&id).await,
            SelectedItem::Album { id } => self.open_album(&id).await,
            SelectedItem::Playlist { id } => self.open_playlist(&id).await,
        }
    }

    /// Drop the identity: token, favorites and the playback session.
    pub async fn sign_out(&self) {
        {
            let mut auth = self.auth.lock().await;
            auth.sign_out().await;
        }
        let mut model = self.model.lock().await;
        model.clear_playback();
        model.catalog.favorites.clear();
        model.open_home();
    }
}

/// Narrow the backend's full dump to entries matching the query.
///
/// The backend search is a naive full scan; the query match happens here,
/// case-insensitively, against names, titles and owning-artist names.
fn filter_search(dump: SearchCatalog, query: &str) -> SearchResults {
    let needle = query.to_lowercase();
    let matches = |text: &str| text.to_lowercase().contains(&needle);

    SearchResults {
        query: query.to_string(),
        tracks: dump
            .songs
            .into_iter()
            .filter(|t| matches(&t.title) || matches(&t.artist))
            .collect(),
        artists: dump
            .artists
            .into_iter()
            .filter(|a| matches(&a.name) || matches(&a.genre))
            .collect(),
        albums: dump
            .albums
            .into_iter()
            .filter(|a| matches(&a.name) || matches(&a.artist))
            .collect(),
        playlists: dump
            .playlists
            .into_iter()
            .filter(|p| matches(&p.name) || matches(&p.owner))
            .collect(),
        best_match: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Track;
    use crate::model::catalog::{Album, Artist};

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

    /// The filter matches case-insensitively across titles and names.
    #[test]
    fn filter_matches_titles_and_artists() {
        let dump = SearchCatalog {
            songs: vec![track("Midnight Sun", "Aurora"), track("Other", "Someone")],
            artists: vec![Artist {
                id: "ar1".to_string(),
                name: "Midnight Choir".to_string(),
                ..Default::default()
            }],
            albums: vec![Album {
                id: "al1".to_string(),
                name: "Unrelated".to_string(),
                artist: "Aurora".to_string(),
                ..Default::default()
            }],
            playlists: Vec::new(),
        };

        let results = filter_search(dump, "midnight");
        assert_eq!(results.tracks.len(), 1);
        assert_eq!(results.artists.len(), 1);
        assert!(results.albums.is_empty());

        // artist-name matches also surface tracks and albums
        let dump = SearchCatalog {
            songs: vec![track("Midnight Sun", "Aurora")],
            albums: vec![Album {
                name: "Unrelated".to_string(),
                artist: "Aurora".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let results = filter_search(dump, "AURORA");
        assert_eq!(results.tracks.len(), 1);
        assert_eq!(results.albums.len(), 1);
    }
}
