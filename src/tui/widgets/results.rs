//! Search results list with page arithmetic in the footer.

use crate::app::state::{AppState, Focus};
use crate::tui::theme::get_theme;
use crate::tui::widgets::truncate_str;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let border_color = if state.focus == Focus::Results {
        theme.palette.accent
    } else {
        theme.palette.border
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} Results ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));

    if let Some(page) = &state.page
        && page.total_pages > 0
    {
        block = block
            .title_bottom(format!(
                " Page {}/{}  n/p to turn ",
                page.page_index + 1,
                page.total_pages
            ))
            .title_style(Style::default().fg(theme.palette.accent));
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(page) = &state.page else {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Type a query and press Enter",
            Style::default().fg(theme.palette.fg_secondary),
        )));
        frame.render_widget(hint, inner);
        return;
    };

    if page.tracks.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No results",
            Style::default().fg(theme.palette.fg_secondary),
        )));
        frame.render_widget(hint, inner);
        return;
    }

    // Keep the selection on screen without a stored offset.
    let visible = inner.height as usize;
    let offset = state.selected.saturating_sub(visible.saturating_sub(1));
    let width = inner.width.saturating_sub(3) as usize;

    let lines: Vec<Line> = page
        .tracks
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, track)| {
            let is_selected = i == state.selected;
            let marker = if is_selected {
                icons.selected
            } else {
                icons.unselected
            };
            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.fg_primary)
                    .bg(theme.palette.bg_highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_secondary)
            };
            Line::from(vec![
                Span::styled(format!("{marker} "), style),
                Span::styled(truncate_str(&track.display_line(), width), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
