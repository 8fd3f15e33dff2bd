//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // An error notification blocks other interactions until dismissed.
        if model.ui_state.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                model.ui_state.error_message = None;
                model.ui_state.error_timestamp = None;
            }
            return Ok(());
        }

        if model.is_help_popup_open() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H')) {
                model.hide_help_popup();
            }
            return Ok(());
        }

        let active_section = model.ui_state.active_section;

        // Search section consumes printable keys as query input.
        if active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        model.cycle_section_backward();
                    } else {
                        model.cycle_section_forward();
                    }
                    return Ok(());
                }
                KeyCode::Enter => {
                    let query = model.search_query().to_string();
                    drop(model);
                    if !query.is_empty() {
                        self.perform_search(&query).await;
                    }
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.ui_state.search_query.clear();
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search();
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit();
                        return Ok(());
                    }
                    model.append_to_search(c);
                    return Ok(());
                }
                _ => {}
            }
        }

        // Main content navigation.
        if active_section == ActiveSection::MainContent {
            match key.code {
                KeyCode::Up => {
                    model.move_selection_up();
                    return Ok(());
                }
                KeyCode::Down => {
                    model.move_selection_down();
                    return Ok(());
                }
                KeyCode::Left => {
                    model.navigate_content_section(false);
                    return Ok(());
                }
                KeyCode::Right => {
                    model.navigate_content_section(true);
                    return Ok(());
                }
                KeyCode::Enter => {
                    let selected = model.selected_content_item();
                    drop(model);
                    if let Some(item) = selected {
                        self.handle_selected_item(item).await;
                    }
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    model.navigate_back();
                    return Ok(());
                }
                KeyCode::Char('f') | KeyCode::Char('F') => {
                    drop(model);
                    self.toggle_favorite().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings.
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit();
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    model.cycle_section_backward();
                } else {
                    model.cycle_section_forward();
                }
            }
            KeyCode::BackTab => {
                model.cycle_section_backward();
            }
            KeyCode::Up => {
                model.move_selection_up();
            }
            KeyCode::Down => {
                model.move_selection_down();
            }
            KeyCode::Enter => match active_section {
                ActiveSection::Library => {
                    let entry = model.selected_library_entry();
                    drop(model);
                    self.open_library_entry(entry).await;
                    model = self.model.lock().await;
                    model.set_active_section(ActiveSection::MainContent);
                }
                ActiveSection::Playlists => {
                    if let Some(playlist_id) = model.selected_sidebar_playlist() {
                        drop(model);
                        self.open_playlist(&playlist_id).await;
                        model = self.model.lock().await;
                        model.set_active_section(ActiveSection::MainContent);
                    }
                }
                _ => {}
            },
            // Transport controls
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_track().await;
            }
            KeyCode::Char(',') | KeyCode::Char('<') => {
                drop(model);
                self.seek_backward().await;
            }
            KeyCode::Char('.') | KeyCode::Char('>') => {
                drop(model);
                self.seek_forward().await;
            }
            // Focus search
            KeyCode::Char('/') | KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search);
            }
            // Focus playlists
            KeyCode::Char('l') | KeyCode::Char('L') => {
                model.set_active_section(ActiveSection::Playlists);
            }
            // Sign out
            KeyCode::Char('o') | KeyCode::Char('O') => {
                drop(model);
                self.sign_out().await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup();
            }
            _ => {}
        }
        Ok(())
    }
}
