//! Seven-slot lyric window, active line in the middle.

use crate::app::state::AppState;
use crate::lyrics::WINDOW_SLOTS;
use crate::tui::theme::{LoadingSpinner, get_theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Lyrics ", icons.lyrics))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let center_message = |text: String| {
        let mut lines = vec![Line::default(); (inner.height as usize).saturating_sub(1) / 2];
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(theme.palette.fg_secondary),
        )));
        Paragraph::new(lines).alignment(Alignment::Center)
    };

    if state.lyrics.is_loading() {
        frame.render_widget(
            center_message(format!("{} fetching lyrics", LoadingSpinner::frame(state.tick))),
            inner,
        );
        return;
    }
    if state.lyrics.no_lyrics() {
        frame.render_widget(center_message("No lyrics".into()), inner);
        return;
    }
    if !state.lyrics.has_lyrics() {
        frame.render_widget(center_message("-".into()), inner);
        return;
    }

    let window = state.lyrics.window();
    let width = inner.width.saturating_sub(2) as usize;
    let lines: Vec<Line> = window
        .iter()
        .enumerate()
        .map(|(slot, text)| {
            let text = text.unwrap_or("");
            if slot == WINDOW_SLOTS / 2 {
                Line::from(vec![
                    Span::styled(
                        format!("{} ", icons.volume),
                        Style::default().fg(theme.palette.playing),
                    ),
                    Span::styled(
                        super::truncate_str(text, width),
                        Style::default()
                            .fg(theme.palette.playing)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                // Fade with distance from the active line.
                let distance = slot.abs_diff(WINDOW_SLOTS / 2);
                let color = if distance == 1 {
                    theme.palette.fg_secondary
                } else {
                    theme.palette.accent_alt
                };
                Line::from(Span::styled(
                    format!("  {}", super::truncate_str(text, width)),
                    Style::default().fg(color),
                ))
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
