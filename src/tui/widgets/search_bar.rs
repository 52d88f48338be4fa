//! Query input with the active backend in the title.

use crate::app::state::{AppState, Focus};
use crate::tui::theme::{LoadingSpinner, get_theme};
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

    let border_color = if state.focus == Focus::Input {
        theme.palette.accent
    } else {
        theme.palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} Search [{}] ", icons.search, state.backend))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(
        state.query.clone(),
        Style::default().fg(theme.palette.fg_primary),
    )];
    if state.focus == Focus::Input {
        spans.push(Span::styled(
            "█",
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::SLOW_BLINK),
        ));
    }
    if state.searching {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} searching", LoadingSpinner::frame(state.tick)),
            Style::default().fg(theme.palette.fg_secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}
