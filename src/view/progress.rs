//! Player bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::{PlaybackInfo, TransportState};

use super::utils::format_duration;

pub fn render_player_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let state = match (&playback.current_track, playback.is_playing) {
        (None, _) => TransportState::Empty,
        (Some(_), true) => TransportState::LoadedPlaying,
        (Some(_), false) => TransportState::LoadedPaused,
    };

    let status_text = match (&playback.current_track, state) {
        (None, _) => " Nothing playing".to_string(),
        (Some(track), TransportState::LoadedPlaying) => {
            format!(" ▶ {} | {}", track.title, track.artist)
        }
        (Some(track), _) => format!(" ⏸ {} | {}", track.title, track.artist),
    };

    let queue_info = match playback.queue_position {
        Some(position) => format!(" track {}/{} ", position + 1, playback.queue_len),
        None => String::new(),
    };

    let (time_str, ratio) = match &playback.current_track {
        Some(track) if track.duration_secs > 0 => {
            let duration = track.duration_secs as f64;
            let position = playback.position_secs.min(duration);
            (
                format!(
                    "{} / {}",
                    format_duration(position as u64),
                    format_duration(track.duration_secs as u64)
                ),
                (position / duration).clamp(0.0, 1.0),
            )
        }
        Some(_) => (
            // Radio stream: show listening time, keep the gauge idle.
            format!("{} (live)", format_duration(playback.position_secs as u64)),
            0.0,
        ),
        None => (String::new(), 0.0),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", status_text))
                .title_bottom(Line::from(queue_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
