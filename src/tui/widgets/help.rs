//! Help screen showing keybindings.

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render(frame: &mut Frame, _state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Keybinds ", icons.help))
        .title_style(Style::default().fg(theme.palette.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header("Search", &theme),
        keybind("type + Enter", "Run the search", &theme),
        keybind("Tab", "Switch backend (input focus)", &theme),
        keybind("Ctrl+u", "Clear input", &theme),
        keybind("Down", "Focus results", &theme),
        keybind("/ or i", "Back to the input", &theme),
        Line::default(),
        section_header("Results", &theme),
        keybind("j / Down", "Move down", &theme),
        keybind("k / Up", "Move up", &theme),
        keybind("g / G", "Top / bottom", &theme),
        keybind("n / Right", "Next page", &theme),
        keybind("p / Left", "Previous page", &theme),
        keybind("b", "Switch backend", &theme),
        keybind("Ctrl+r / F5", "Re-run the search", &theme),
    ];
    frame.render_widget(
        Paragraph::new(left_content).wrap(Wrap { trim: false }),
        cols[0],
    );

    let right_content = vec![
        section_header("Playback", &theme),
        keybind("Enter", "Play selected track", &theme),
        keybind("Space", "Toggle pause", &theme),
        keybind("s", "Stop", &theme),
        keybind(". / ,", "Next / previous (not implemented)", &theme),
        keybind("+ / -", "Volume up / down", &theme),
        keybind("] / [", "Seek 10s forward / back", &theme),
        Line::default(),
        section_header("Files", &theme),
        keybind("d", "Download selected track", &theme),
        Line::default(),
        section_header("General", &theme),
        keybind("? / F1", "Toggle this screen", &theme),
        keybind("q", "Quit", &theme),
    ];
    frame.render_widget(
        Paragraph::new(right_content).wrap(Wrap { trim: false }),
        cols[1],
    );
}

fn section_header(title: &str, theme: &crate::tui::theme::Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {} ━━", title),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &crate::tui::theme::Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(
            format!("{:14}", key),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            desc.to_string(),
            Style::default().fg(theme.palette.fg_primary),
        ),
    ])
}
