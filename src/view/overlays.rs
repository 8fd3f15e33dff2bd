//! Modal overlays (error notification, help popup)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::model::UiState;

/// Center a popup of the given size within the frame.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    let Some(message) = &ui_state.error_message else {
        return;
    };

    let area = centered_rect(60, 5, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(message.as_str())
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Error (Esc to dismiss) ")
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(popup, area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 18, frame.area());
    frame.render_widget(Clear, area);

    let key = |k: &str, what: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), Style::default().fg(Color::Green)),
            Span::raw(what.to_string()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            " Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        key("Tab", "cycle focus between sections"),
        key("↑/↓", "move the selection"),
        key("←/→", "switch shelves / result sections"),
        key("Enter", "play track or open item"),
        key("Esc", "back"),
        key("Space", "play / pause"),
        key("n / p", "next / previous track"),
        key(", / .", "seek backward / forward"),
        key("f", "toggle favorite"),
        key("/", "focus search"),
        key("l", "focus playlists"),
        key("o", "sign out"),
        key("h", "this help"),
        key("q", "quit"),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(popup, area);
}
