//! Top-level layout: search bar over the results list, with the player,
//! visualizer and lyrics panes along the bottom.

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use crate::tui::widgets;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
};

const BOTTOM_BAR_HEIGHT: u16 = 9;

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let theme = get_theme();
    let area = frame.area();

    // Background wash
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.palette.bg_primary)),
        area,
    );

    if state.show_help {
        widgets::help::render(frame, state, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(BOTTOM_BAR_HEIGHT),
        ])
        .split(area);

    widgets::search_bar::render(frame, state, rows[0]);
    widgets::results::render(frame, state, rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(32),
            Constraint::Percentage(34),
            Constraint::Percentage(34),
        ])
        .split(rows[2]);

    widgets::player_bar::render(frame, state, bottom[0]);
    widgets::visualizer::render(frame, state, bottom[1]);
    widgets::lyrics_pane::render(frame, state, bottom[2]);
}
