//! Main content area rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::content::{
    ArtistSection, ContentState, ContentView, HomeSection, SearchResults, SearchSection,
};
use crate::model::{ActiveSection, Catalog, Track, UiState};

use super::utils::{format_duration, render_scrollable_list, row_style, truncate_string};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
    catalog: &Catalog,
    current_track_id: Option<&str>,
) {
    let focused = ui_state.active_section == ActiveSection::MainContent;

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Content "));
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Home {
            section,
            song_index,
            artist_index,
            album_index,
            radio_index,
            playlist_index,
        } => render_home(
            frame,
            area,
            catalog,
            *section,
            [
                *song_index,
                *artist_index,
                *album_index,
                *radio_index,
                *playlist_index,
            ],
            focused,
            current_track_id,
        ),
        ContentView::AllSongs { selected_index } => {
            render_track_table(
                frame,
                area,
                " All songs ",
                &catalog.songs,
                *selected_index,
                focused,
                current_track_id,
            );
        }
        ContentView::Radios {
            radios,
            selected_index,
        } => {
            let items: Vec<ListItem> = radios
                .iter()
                .enumerate()
                .map(|(i, radio)| {
                    let line = format!("{}  {}", radio.name, radio.description);
                    ListItem::new(truncate_string(&line, (area.width as usize).saturating_sub(4)))
                        .style(row_style(i == *selected_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                area,
                items,
                *selected_index,
                section_block(" Radios ", focused),
            );
        }
        ContentView::Favorites {
            tracks,
            selected_index,
        } => {
            render_track_table(
                frame,
                area,
                " Favorites ",
                tracks,
                *selected_index,
                focused,
                current_track_id,
            );
        }
        ContentView::ArtistDetail {
            detail,
            section,
            popular_index,
            track_index,
            album_index,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(5), Constraint::Min(0)])
                .split(area);

            let mut header = vec![Line::from(vec![
                Span::styled(
                    detail.artist.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", detail.artist.genre),
                    Style::default().fg(Color::Gray),
                ),
            ])];
            if !detail.artist.bio.is_empty() {
                header.push(Line::from(Span::styled(
                    truncate_string(&detail.artist.bio, (area.width as usize).saturating_sub(4) * 2),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            let about = Paragraph::new(header)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Artist "));
            frame.render_widget(about, chunks[0]);

            match section {
                ArtistSection::PopularTracks => render_track_table(
                    frame,
                    chunks[1],
                    " Popular tracks ",
                    &detail.popular_tracks,
                    *popular_index,
                    focused,
                    current_track_id,
                ),
                ArtistSection::AllTracks => render_track_table(
                    frame,
                    chunks[1],
                    " All tracks ",
                    &detail.tracks,
                    *track_index,
                    focused,
                    current_track_id,
                ),
                ArtistSection::Albums => {
                    let items: Vec<ListItem> = detail
                        .albums
                        .iter()
                        .enumerate()
                        .map(|(i, album)| {
                            let year = album
                                .release_date
                                .map(|d| d.format(" (%Y)").to_string())
                                .unwrap_or_default();
                            ListItem::new(format!("{}{}", album.name, year))
                                .style(row_style(i == *album_index, focused))
                        })
                        .collect();
                    render_scrollable_list(
                        frame,
                        chunks[1],
                        items,
                        *album_index,
                        section_block(" Albums ", focused),
                    );
                }
            }
        }
        ContentView::AlbumDetail {
            detail,
            selected_index,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(area);

            let release = detail
                .album
                .release_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    detail.album.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("{}  ·  released {}", detail.album.artist, release),
                    Style::default().fg(Color::Gray),
                )),
            ])
            .block(Block::default().borders(Borders::ALL).title(" Album "));
            frame.render_widget(header, chunks[0]);

            render_track_table(
                frame,
                chunks[1],
                " Tracks ",
                &detail.tracks,
                *selected_index,
                focused,
                current_track_id,
            );
        }
        ContentView::PlaylistDetail {
            detail,
            selected_index,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(4), Constraint::Min(0)])
                .split(area);

            let header = Paragraph::new(vec![
                Line::from(Span::styled(
                    detail.playlist.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!(
                        "by {}  ·  {} songs",
                        if detail.playlist.owner.is_empty() {
                            "unknown"
                        } else {
                            &detail.playlist.owner
                        },
                        detail.tracks.len()
                    ),
                    Style::default().fg(Color::Gray),
                )),
            ])
            .block(Block::default().borders(Borders::ALL).title(" Playlist "));
            frame.render_widget(header, chunks[0]);

            render_track_table(
                frame,
                chunks[1],
                " Songs in playlist ",
                &detail.tracks,
                *selected_index,
                focused,
                current_track_id,
            );
        }
        ContentView::SearchResults {
            results,
            section,
            track_index,
            artist_index,
            album_index,
            playlist_index,
        } => render_search_results(
            frame,
            area,
            results,
            *section,
            [*track_index, *artist_index, *album_index, *playlist_index],
            focused,
            current_track_id,
        ),
    }
}

fn section_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .padding(Padding::horizontal(1))
        .border_style(if focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        })
}

/// One row per track: position, now-playing marker, title, artist, views,
/// duration.
fn render_track_table(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    selected: usize,
    focused: bool,
    current_track_id: Option<&str>,
) {
    let width = area.width as usize;
    let items: Vec<ListItem> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let marker = if current_track_id == Some(track.id.as_str()) {
                "▶ "
            } else {
                "  "
            };
            let duration = if track.duration_secs > 0 {
                format_duration(track.duration_secs as u64)
            } else {
                "live".to_string()
            };
            let left = format!("{:>3}. {}{} — {}", i + 1, marker, track.title, track.artist);
            let right = format!("{} views  {}", track.views, duration);
            let left_width = width.saturating_sub(right.len() + 5);
            let line = format!(
                "{:<left_width$} {}",
                truncate_string(&left, left_width),
                right
            );
            ListItem::new(line).style(row_style(i == selected, focused))
        })
        .collect();

    if items.is_empty() {
        let empty = Paragraph::new("Nothing here yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(section_block(title, focused));
        frame.render_widget(empty, area);
        return;
    }

    render_scrollable_list(frame, area, items, selected, section_block(title, focused));
}

fn render_home(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    section: HomeSection,
    indices: [usize; 5],
    focused: bool,
    current_track_id: Option<&str>,
) {
    use crate::model::{HOME_ALBUM_CAP, HOME_ARTIST_CAP, HOME_RADIO_CAP, HOME_SONG_CAP};

    let [song_index, artist_index, album_index, radio_index, playlist_index] = indices;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    // Shelf switcher line: the active shelf is highlighted.
    let mut spans = Vec::new();
    let all_sections = [
        HomeSection::ListenAgain,
        HomeSection::Artists,
        HomeSection::Albums,
        HomeSection::Radios,
        HomeSection::Playlists,
    ];
    for (i, s) in all_sections.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  |  "));
        }
        let style = if *s == section {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(s.title(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match section {
        HomeSection::ListenAgain => {
            let shelf: Vec<Track> = catalog.songs.iter().take(HOME_SONG_CAP).cloned().collect();
            render_track_table(
                frame,
                chunks[1],
                " Listen again ",
                &shelf,
                song_index,
                focused,
                current_track_id,
            );
        }
        HomeSection::Artists => {
            let items: Vec<ListItem> = catalog
                .artists
                .iter()
                .take(HOME_ARTIST_CAP)
                .enumerate()
                .map(|(i, artist)| {
                    ListItem::new(format!("{}  {}", artist.name, artist.genre))
                        .style(row_style(i == artist_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                artist_index,
                section_block(" Similar to ", focused),
            );
        }
        HomeSection::Albums => {
            let items: Vec<ListItem> = catalog
                .albums
                .iter()
                .take(HOME_ALBUM_CAP)
                .enumerate()
                .map(|(i, album)| {
                    ListItem::new(format!("{} — {}", album.name, album.artist))
                        .style(row_style(i == album_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                album_index,
                section_block(" Albums for you ", focused),
            );
        }
        HomeSection::Radios => {
            let items: Vec<ListItem> = catalog
                .radios
                .iter()
                .take(HOME_RADIO_CAP)
                .enumerate()
                .map(|(i, radio)| {
                    ListItem::new(format!("{}  {}", radio.name, radio.description))
                        .style(row_style(i == radio_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                radio_index,
                section_block(" Radios for you ", focused),
            );
        }
        HomeSection::Playlists => {
            let items: Vec<ListItem> = catalog
                .playlists
                .iter()
                .enumerate()
                .map(|(i, playlist)| {
                    ListItem::new(format!(
                        "{} — {} songs",
                        playlist.name,
                        playlist.tracks.len()
                    ))
                    .style(row_style(i == playlist_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                playlist_index,
                section_block(" Featured playlists ", focused),
            );
        }
    }
}

fn render_search_results(
    frame: &mut Frame,
    area: Rect,
    results: &SearchResults,
    section: SearchSection,
    indices: [usize; 4],
    focused: bool,
    current_track_id: Option<&str>,
) {
    let [track_index, artist_index, album_index, playlist_index] = indices;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let tabs = [
        (SearchSection::Tracks, format!("Songs ({})", results.tracks.len())),
        (
            SearchSection::Artists,
            format!("Artists ({})", results.artists.len()),
        ),
        (
            SearchSection::Albums,
            format!("Albums ({})", results.albums.len()),
        ),
        (
            SearchSection::Playlists,
            format!("Playlists ({})", results.playlists.len()),
        ),
    ];
    let mut spans = vec![Span::styled(
        format!("Results for \"{}\":  ", results.query),
        Style::default().fg(Color::White),
    )];
    for (i, (s, label)) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  |  "));
        }
        let style = if *s == section {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(label.clone(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), chunks[0]);

    match section {
        SearchSection::Tracks => render_track_table(
            frame,
            chunks[1],
            " Songs ",
            &results.tracks,
            track_index,
            focused,
            current_track_id,
        ),
        SearchSection::Artists => {
            let items: Vec<ListItem> = results
                .artists
                .iter()
                .enumerate()
                .map(|(i, artist)| {
                    ListItem::new(format!("{}  {}", artist.name, artist.genre))
                        .style(row_style(i == artist_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                artist_index,
                section_block(" Artists ", focused),
            );
        }
        SearchSection::Albums => {
            let items: Vec<ListItem> = results
                .albums
                .iter()
                .enumerate()
                .map(|(i, album)| {
                    ListItem::new(format!("{} — {}", album.name, album.artist))
                        .style(row_style(i == album_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                album_index,
                section_block(" Albums ", focused),
            );
        }
        SearchSection::Playlists => {
            let items: Vec<ListItem> = results
                .playlists
                .iter()
                .enumerate()
                .map(|(i, playlist)| {
                    ListItem::new(format!(
                        "{} — {} songs",
                        playlist.name,
                        playlist.tracks.len()
                    ))
                    .style(row_style(i == playlist_index, focused))
                })
                .collect();
            render_scrollable_list(
                frame,
                chunks[1],
                items,
                playlist_index,
                section_block(" Playlists ", focused),
            );
        }
    }
}
