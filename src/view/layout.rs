//! Layout rendering (top bar, sidebar structure)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

use crate::model::{ActiveSection, Catalog, LibraryEntry, UiState};

use super::utils::row_style;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, profile_label: &str) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Search input
            Constraint::Length(28), // Signed-in profile
        ])
        .split(area);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let search_style = if search_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };

    let search_text = if ui_state.search_query.is_empty() {
        "Type to search..."
    } else {
        &ui_state.search_query
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .padding(Padding::horizontal(1))
            .border_style(if search_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(search, chunks[0]);

    let profile = Paragraph::new(format!("♪ {}", profile_label))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL).title(" Profile "));
    frame.render_widget(profile, chunks[1]);
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, ui_state: &UiState, catalog: &Catalog) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LibraryEntry::ALL.len() as u16 + 2),
            Constraint::Min(0), // Playlists fill the remaining space
        ])
        .split(area);

    let library_focused = ui_state.active_section == ActiveSection::Library;
    let library_items: Vec<ListItem> = LibraryEntry::ALL
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            ListItem::new(entry.label())
                .style(row_style(i == ui_state.library_selected, library_focused))
        })
        .collect();

    let library = List::new(library_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Library ")
            .padding(Padding::horizontal(1))
            .border_style(if library_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );
    frame.render_widget(library, chunks[0]);

    let playlists_focused = ui_state.active_section == ActiveSection::Playlists;
    let playlist_items: Vec<ListItem> = catalog
        .playlists
        .iter()
        .enumerate()
        .map(|(i, playlist)| {
            ListItem::new(playlist.name.clone())
                .style(row_style(i == ui_state.playlist_selected, playlists_focused))
        })
        .collect();

    let playlists = List::new(playlist_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Playlists ")
            .padding(Padding::horizontal(1))
            .border_style(if playlists_focused {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            }),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.playlist_selected));
    frame.render_stateful_widget(playlists, chunks[1], &mut list_state);
}
