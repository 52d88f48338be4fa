//! Compact text-only player pane for the bottom bar.

use crate::app::state::{AppState, ToastKind};
use crate::player::PlaybackState;
use crate::tui::theme::{Icons, LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Player ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Track title
            Constraint::Length(1), // Artist
            Constraint::Length(1), // Progress bar
            Constraint::Length(1), // Time + state + volume
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Toast (if any)
        ])
        .split(padded);

    let content_width = padded.width.saturating_sub(1) as usize;

    let (title, artist) = match &state.session {
        Some(s) => (s.track.title.clone(), s.track.artist.clone()),
        None => ("Not playing".to_string(), String::new()),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            super::truncate_str(&title, content_width),
            Style::default()
                .fg(theme.palette.fg_primary)
                .add_modifier(Modifier::BOLD),
        ))),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            super::truncate_str(&artist, content_width),
            Style::default().fg(theme.palette.fg_secondary),
        ))),
        rows[1],
    );

    let (position_ms, duration_ms, playback) = match &state.session {
        Some(s) => (s.position_ms, s.duration_ms, s.state),
        None => (0, 0, PlaybackState::Stopped),
    };
    let ratio = if duration_ms > 0 {
        (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            progress_bar(rows[2].width as usize, ratio, icons),
            Style::default().fg(theme.palette.accent),
        ))),
        rows[2],
    );

    let state_icon = match playback {
        PlaybackState::Playing => icons.play,
        PlaybackState::Paused => icons.pause,
        PlaybackState::Stopped => icons.stop,
    };
    let vol_icon = if state.volume == 0 {
        icons.volume_mute
    } else {
        icons.volume
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}/{}", fmt_time(position_ms), fmt_time(duration_ms)),
                Style::default().fg(theme.palette.fg_secondary),
            ),
            Span::raw("  "),
            Span::styled(state_icon, Style::default().fg(theme.palette.playing)),
            Span::raw("  "),
            Span::styled(vol_icon, Style::default().fg(theme.palette.fg_secondary)),
            Span::raw(" "),
            Span::styled(
                format!("{}%", state.volume),
                Style::default().fg(theme.palette.fg_secondary),
            ),
        ])),
        rows[3],
    );

    // Busy indicators take priority over the plain status text.
    let status = if state.resolving {
        format!("{} resolving stream", LoadingSpinner::frame(state.tick))
    } else if state.downloading {
        format!("{} downloading", LoadingSpinner::frame(state.tick))
    } else {
        state.status.clone()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            super::truncate_str(&status, content_width),
            Style::default().fg(theme.palette.fg_secondary),
        ))),
        rows[4],
    );

    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (icons.success, theme.palette.playing),
            ToastKind::Error => (icons.error, theme.palette.error),
            ToastKind::Info => (icons.info, theme.palette.accent),
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{prefix} "), Style::default().fg(color)),
                Span::styled(
                    super::truncate_str(&toast.message, content_width.saturating_sub(3)),
                    Style::default().fg(color),
                ),
            ])),
            rows[5],
        );
    }
}

fn fmt_time(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }
    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::fmt_time;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(fmt_time(0), "00:00");
        assert_eq!(fmt_time(59_999), "00:59");
        assert_eq!(fmt_time(75_000), "01:15");
        assert_eq!(fmt_time(3_600_000), "60:00");
    }
}
