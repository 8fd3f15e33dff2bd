//! Core type definitions for UI state

use std::time::Instant;

use super::context::PlayContext;
use super::playback::Track;

/// Which section of the UI is currently active/focused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveSection {
    Search,
    Library,
    Playlists,
    MainContent,
}

impl ActiveSection {
    pub fn next(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::Library,
            ActiveSection::Library => ActiveSection::Playlists,
            ActiveSection::Playlists => ActiveSection::MainContent,
            ActiveSection::MainContent => ActiveSection::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActiveSection::Search => ActiveSection::MainContent,
            ActiveSection::Library => ActiveSection::Search,
            ActiveSection::Playlists => ActiveSection::Library,
            ActiveSection::MainContent => ActiveSection::Playlists,
        }
    }
}

/// Fixed entries of the Library sidebar section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LibraryEntry {
    Home,
    AllSongs,
    Radios,
    Favorites,
}

impl LibraryEntry {
    pub const ALL: [LibraryEntry; 4] = [
        LibraryEntry::Home,
        LibraryEntry::AllSongs,
        LibraryEntry::Radios,
        LibraryEntry::Favorites,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LibraryEntry::Home => "Home",
            LibraryEntry::AllSongs => "All songs",
            LibraryEntry::Radios => "Radios",
            LibraryEntry::Favorites => "Favorites",
        }
    }
}

/// A selected item for action handling: what the cursor points at.
#[derive(Clone, Debug)]
pub enum SelectedItem {
    /// A playable track together with the context its queue resolves from.
    Track { track: Track, context: PlayContext },
    Artist { id: String },
    Album { id: String },
    Playlist { id: String },
}

/// Shared UI state: focus, search input, sidebar cursors, notifications.
#[derive(Clone)]
pub struct UiState {
    pub active_section: ActiveSection,
    pub search_query: String,
    pub library_selected: usize,
    pub playlist_selected: usize,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
    pub show_help_popup: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_section: ActiveSection::Library,
            search_query: String::new(),
            library_selected: 0,
            playlist_selected: 0,
            error_message: None,
            error_timestamp: None,
            show_help_popup: false,
        }
    }
}
