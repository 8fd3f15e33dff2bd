//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (focus sections, sidebar entries, UI state)
//! - `playback`: The playback session - queue, current track, transport state
//! - `context`: Queue resolution from browsing contexts
//! - `catalog`: Client cache of the backend catalog collections
//! - `content`: Content view data (home shelves, details, search results)
//! - `api_client`: REST client for the catalog backend
//! - `app_model`: Main application model with state management methods

pub mod catalog;
pub mod content;
pub mod context;
mod types;
mod playback;
mod api_client;
mod app_model;

pub use types::{ActiveSection, LibraryEntry, SelectedItem, UiState};

pub use playback::{PlaybackInfo, PlaybackSession, Track, TransportState};

pub use context::PlayContext;

pub use catalog::Catalog;

pub use content::{ContentState, ContentView, SearchResults};

pub use api_client::{ApiClient, SearchCatalog};

pub use app_model::{
    AppModel, HOME_ALBUM_CAP, HOME_ARTIST_CAP, HOME_RADIO_CAP, HOME_SONG_CAP,
};
