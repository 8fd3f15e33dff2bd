//! Typed REST client for the catalog backend.
//!
//! Owns the wire-format normalization: the backend serves snake_case
//! persistence fields with a few camelCase irregularities, nested
//! `Artist`/`Album`/`Songs` includes, and `HH:MM:SS` duration strings.
//! Everything is flattened here into the model types the rest of the
//! client consumes.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::auth::AuthUser;

use super::catalog::{Album, Artist, Favorite, Playlist, Radio};
use super::playback::Track;

/// REST client for the catalog backend.
///
/// Cheap to clone; the bearer token is shared so a sign-in is visible to
/// every clone immediately.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("GET {path}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("GET {path} returned {status}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding GET {path}"))
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url).json(body);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("POST {path}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("POST {path} returned {status}");
        }
        response
            .json::<T>()
            .await
            .with_context(|| format!("decoding POST {path}"))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.delete(&url);
        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("DELETE {path}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("DELETE {path} returned {status}");
        }
        Ok(())
    }

    // ========================================================================
    // Catalog collections
    // ========================================================================

    pub async fn list_songs(&self) -> Result<Vec<Track>> {
        tracing::debug!("API: list_songs");
        let dtos: Vec<SongDto> = self.get_json("/songs").await?;
        Ok(dtos.into_iter().map(SongDto::into_track).collect())
    }

    pub async fn list_artists(&self) -> Result<Vec<Artist>> {
        tracing::debug!("API: list_artists");
        let dtos: Vec<ArtistDto> = self.get_json("/artists").await?;
        Ok(dtos.into_iter().map(ArtistDto::into_artist).collect())
    }

    pub async fn list_albums(&self) -> Result<Vec<Album>> {
        tracing::debug!("API: list_albums");
        let dtos: Vec<AlbumDto> = self.get_json("/albums").await?;
        Ok(dtos.into_iter().map(AlbumDto::into_album).collect())
    }

    pub async fn list_radios(&self) -> Result<Vec<Radio>> {
        tracing::debug!("API: list_radios");
        let dtos: Vec<RadioDto> = self.get_json("/radios").await?;
        Ok(dtos.into_iter().map(RadioDto::into_radio).collect())
    }

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        tracing::debug!("API: list_playlists");
        let dtos: Vec<PlaylistDto> = self.get_json("/playlists").await?;
        Ok(dtos.into_iter().map(PlaylistDto::into_playlist).collect())
    }

    pub async fn list_favorites(&self) -> Result<Vec<Favorite>> {
        tracing::debug!("API: list_favorites");
        let dtos: Vec<FavoriteDto> = self.get_json("/favorites").await?;
        Ok(dtos.into_iter().map(FavoriteDto::into_favorite).collect())
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    pub async fn add_favorite(&self, user_id: i64, song_id: &str) -> Result<()> {
        tracing::debug!(user_id, song_id, "API: add_favorite");
        let body = serde_json::json!({ "userId": user_id, "songId": song_id });
        let _: serde_json::Value = self.post_json("/favorites", &body).await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, favorite_id: &str) -> Result<()> {
        tracing::debug!(favorite_id, "API: remove_favorite");
        self.delete(&format!("/favorites/{favorite_id}")).await
    }

    /// Bump a song's play count; returns the new count.
    pub async fn increment_views(&self, song_id: &str) -> Result<u64> {
        tracing::debug!(song_id, "API: increment_views");
        let body = serde_json::json!({});
        let response: ViewsDto = self
            .post_json(&format!("/songs/{song_id}/increment-views"), &body)
            .await?;
        Ok(response.new_views)
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Full-scan cross-entity search dump; filtering happens client-side.
    pub async fn search(&self) -> Result<SearchCatalog> {
        tracing::debug!("API: search");
        let dto: SearchDto = self.get_json("/search").await?;
        Ok(SearchCatalog {
            songs: dto.songs.into_iter().map(SongDto::into_track).collect(),
            artists: dto.artists.into_iter().map(ArtistDto::into_artist).collect(),
            albums: dto.albums.into_iter().map(AlbumDto::into_album).collect(),
            playlists: dto
                .playlists
                .into_iter()
                .map(PlaylistDto::into_playlist)
                .collect(),
        })
    }

    // ========================================================================
    // Identity
    // ========================================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<(String, AuthUser)> {
        tracing::debug!(email, "API: login");
        let body = serde_json::json!({ "email": email, "password": password });
        let response: AuthResponseDto = self.post_json("/auth/login", &body).await?;
        Ok((response.token, response.user.into_auth_user()))
    }

    pub async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(String, AuthUser)> {
        tracing::debug!(email, "API: signup");
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let response: AuthResponseDto = self.post_json("/auth/signup", &body).await?;
        Ok((response.token, response.user.into_auth_user()))
    }

    /// Read-through refresh of the synced user record.
    pub async fn sync_profile(&self) -> Result<AuthUser> {
        tracing::debug!("API: sync_profile");
        let body = serde_json::json!({});
        let response: SyncResponseDto = self.post_json("/auth/sync", &body).await?;
        Ok(response.user.into_auth_user())
    }

    pub async fn get_profile(&self) -> Result<AuthUser> {
        tracing::debug!("API: get_profile");
        let dto: UserDto = self.get_json("/profile").await?;
        Ok(dto.into_auth_user())
    }
}

/// Everything the `/search` full scan returns, normalized.
#[derive(Debug, Default)]
pub struct SearchCatalog {
    pub songs: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub playlists: Vec<Playlist>,
}

/// Parse a `HH:MM:SS` or `MM:SS` time string into seconds; anything else is 0.
pub fn parse_duration_secs(raw: &str) -> u32 {
    let parts: Vec<&str> = raw.split(':').collect();
    let numbers: Option<Vec<u32>> = parts.iter().map(|p| p.trim().parse().ok()).collect();
    match numbers.as_deref() {
        Some([h, m, s]) => h * 3600 + m * 60 + s,
        Some([m, s]) => m * 60 + s,
        Some([s]) => *s,
        _ => 0,
    }
}

/// Parse a date that may arrive as RFC 3339 or a plain `YYYY-MM-DD`.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

// ============================================================================
// Wire DTOs
//
// Field names are the snake_case column spellings; aliases cover the
// camelCase attribute spellings the backend emits on some endpoints.
// ============================================================================

#[derive(Debug, Deserialize)]
struct NameRefDto {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct SongDto {
    #[serde(alias = "songId")]
    song_id: String,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "artistId")]
    artist_id: Option<String>,
    #[serde(default, alias = "albumId")]
    album_id: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default, alias = "audioUrl")]
    audio_url: Option<String>,
    #[serde(default, alias = "coverImage")]
    cover_image: Option<String>,
    #[serde(default)]
    views: Option<u64>,
    #[serde(default, rename = "Artist")]
    artist: Option<NameRefDto>,
    #[serde(default, rename = "Album")]
    album: Option<NameRefDto>,
}

impl SongDto {
    fn into_track(self) -> Track {
        Track {
            id: self.song_id,
            title: self.title,
            artist_id: self.artist_id.unwrap_or_default(),
            artist: self.artist.map(|a| a.name).unwrap_or_default(),
            album_id: self.album_id,
            album: self.album.map(|a| a.name),
            duration_secs: self
                .duration
                .as_deref()
                .map(parse_duration_secs)
                .unwrap_or(0),
            media_url: self.audio_url.unwrap_or_default(),
            artwork_url: self.cover_image.unwrap_or_default(),
            views: self.views.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ArtistDto {
    #[serde(alias = "artistId")]
    artist_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default, alias = "profileImage")]
    profile_image: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default, alias = "coverImage")]
    cover_image: Option<String>,
}

impl ArtistDto {
    fn into_artist(self) -> Artist {
        Artist {
            id: self.artist_id,
            name: self.name,
            genre: self.genre.unwrap_or_default(),
            profile_image: self.profile_image.unwrap_or_default(),
            cover_image: self.cover_image.unwrap_or_default(),
            bio: self.bio.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlbumSongRefDto {
    #[serde(alias = "songId")]
    song_id: String,
}

#[derive(Debug, Deserialize)]
struct AlbumDto {
    #[serde(alias = "albumId")]
    album_id: String,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "artistId")]
    artist_id: Option<String>,
    #[serde(default, alias = "coverImage")]
    cover_image: Option<String>,
    #[serde(default, alias = "releaseDate")]
    release_date: Option<String>,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "Artist")]
    artist: Option<NameRefDto>,
    #[serde(default, rename = "Songs")]
    songs: Vec<AlbumSongRefDto>,
}

impl AlbumDto {
    fn into_album(self) -> Album {
        Album {
            id: self.album_id,
            name: self.name,
            artist_id: self.artist_id.unwrap_or_default(),
            artist: self.artist.map(|a| a.name).unwrap_or_default(),
            cover_image: self.cover_image.unwrap_or_default(),
            release_date: self.release_date.as_deref().and_then(parse_date),
            genre: self.genre.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            song_ids: self.songs.into_iter().map(|s| s.song_id).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RadioDto {
    #[serde(alias = "radioId")]
    radio_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "coverImage")]
    cover_image: Option<String>,
    #[serde(default, alias = "streamUrl")]
    stream_url: Option<String>,
}

impl RadioDto {
    fn into_radio(self) -> Radio {
        Radio {
            id: self.radio_id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            cover_image: self.cover_image.unwrap_or_default(),
            stream_url: self.stream_url.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistOwnerDto {
    #[serde(default)]
    username: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistDto {
    #[serde(alias = "playlistId")]
    playlist_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "coverImage")]
    cover_image: Option<String>,
    #[serde(default, rename = "User")]
    user: Option<PlaylistOwnerDto>,
    #[serde(default, rename = "Songs")]
    songs: Vec<SongDto>,
}

impl PlaylistDto {
    fn into_playlist(self) -> Playlist {
        Playlist {
            id: self.playlist_id,
            name: self.name,
            description: self.description.unwrap_or_default(),
            cover_image: self.cover_image.unwrap_or_default(),
            owner: self.user.map(|u| u.username).unwrap_or_default(),
            tracks: self.songs.into_iter().map(SongDto::into_track).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FavoriteDto {
    #[serde(alias = "favoriteId")]
    favorite_id: String,
    #[serde(alias = "userId")]
    user_id: i64,
    #[serde(alias = "songId")]
    song_id: String,
}

impl FavoriteDto {
    fn into_favorite(self) -> Favorite {
        Favorite {
            id: self.favorite_id,
            user_id: self.user_id,
            song_id: self.song_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ViewsDto {
    #[serde(alias = "newViews")]
    new_views: u64,
}

#[derive(Debug, Deserialize)]
struct SearchDto {
    #[serde(default)]
    songs: Vec<SongDto>,
    #[serde(default)]
    artists: Vec<ArtistDto>,
    #[serde(default)]
    albums: Vec<AlbumDto>,
    #[serde(default)]
    playlists: Vec<PlaylistDto>,
}

#[derive(Debug, Deserialize)]
struct UserDto {
    #[serde(default, alias = "userId")]
    user_id: i64,
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default, alias = "profileImage")]
    profile_image: Option<String>,
}

impl UserDto {
    fn into_auth_user(self) -> AuthUser {
        AuthUser {
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            profile_image: self.profile_image,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthResponseDto {
    token: String,
    user: UserDto,
}

#[derive(Debug, Deserialize)]
struct SyncResponseDto {
    user: UserDto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_strings_parse_to_seconds() {
        assert_eq!(parse_duration_secs("00:03:45"), 225);
        assert_eq!(parse_duration_secs("03:45"), 225);
        assert_eq!(parse_duration_secs("1:00:00"), 3600);
        assert_eq!(parse_duration_secs("90"), 90);
        assert_eq!(parse_duration_secs(""), 0);
        assert_eq!(parse_duration_secs("garbage"), 0);
    }

    /// The backend mixes snake_case columns and camelCase attributes; both
    /// spellings must decode to the same track.
    #[test]
    fn song_decodes_both_casings() {
        let snake = r#"{
            "song_id": "s1",
            "title": "First",
            "artist_id": "ar1",
            "album_id": "al1",
            "duration": "00:02:30",
            "audio_url": "http://media.local/s1.mp3",
            "cover_image": "http://img.local/s1.png",
            "views": 12,
            "Artist": { "name": "Someone" },
            "Album": { "name": "Debut" }
        }"#;
        let camel = r#"{
            "songId": "s1",
            "title": "First",
            "artistId": "ar1",
            "albumId": "al1",
            "duration": "00:02:30",
            "audioUrl": "http://media.local/s1.mp3",
            "coverImage": "http://img.local/s1.png",
            "views": 12,
            "Artist": { "name": "Someone" },
            "Album": { "name": "Debut" }
        }"#;

        let a = serde_json::from_str::<SongDto>(snake).unwrap().into_track();
        let b = serde_json::from_str::<SongDto>(camel).unwrap().into_track();
        assert_eq!(a, b);
        assert_eq!(a.id, "s1");
        assert_eq!(a.duration_secs, 150);
        assert_eq!(a.artist, "Someone");
        assert_eq!(a.album.as_deref(), Some("Debut"));
        assert_eq!(a.views, 12);
    }

    /// Albums keep their nested track listing order.
    #[test]
    fn album_keeps_song_listing_order() {
        let json = r#"{
            "album_id": "al1",
            "name": "Debut",
            "artist_id": "ar1",
            "release_date": "2024-11-02T00:00:00.000Z",
            "Artist": { "name": "Someone" },
            "Songs": [ { "song_id": "s9" }, { "song_id": "s2" } ]
        }"#;
        let album = serde_json::from_str::<AlbumDto>(json).unwrap().into_album();
        assert_eq!(album.song_ids, vec!["s9", "s2"]);
        assert_eq!(
            album.release_date,
            NaiveDate::from_ymd_opt(2024, 11, 2)
        );
        assert_eq!(album.artist, "Someone");
    }

    /// Playlists flatten nested full songs into tracks.
    #[test]
    fn playlist_flattens_nested_songs() {
        let json = r#"{
            "playlist_id": "p1",
            "name": "Late night",
            "User": { "username": "dj", "email": "dj@example.com" },
            "Songs": [
                { "song_id": "s1", "title": "One", "duration": "03:00",
                  "Artist": { "name": "A" } },
                { "song_id": "s2", "title": "Two", "duration": "04:00",
                  "Artist": { "name": "B" } }
            ]
        }"#;
        let playlist = serde_json::from_str::<PlaylistDto>(json)
            .unwrap()
            .into_playlist();
        assert_eq!(playlist.owner, "dj");
        let ids: Vec<&str> = playlist.tracks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
        assert_eq!(playlist.tracks[0].duration_secs, 180);
    }

    /// Missing optional fields decode to safe defaults instead of failing.
    #[test]
    fn sparse_payloads_decode_with_defaults() {
        let track = serde_json::from_str::<SongDto>(r#"{ "song_id": "s1" }"#)
            .unwrap()
            .into_track();
        assert_eq!(track.duration_secs, 0);
        assert!(track.media_url.is_empty());

        let radio = serde_json::from_str::<RadioDto>(r#"{ "radio_id": "r1", "name": "n" }"#)
            .unwrap()
            .into_radio();
        assert!(radio.stream_url.is_empty());
    }
}
