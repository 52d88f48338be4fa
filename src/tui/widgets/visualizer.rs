//! Decorative spectrum pane.
//!
//! Bars come straight from the synthetic magnitudes in
//! [`crate::app::state::Visualizer`]; each column gets its own color from
//! a hue ramp. When nothing is playing a set of slow sine waves fills the
//! pane instead.

use crate::app::state::{AppState, VISUALIZER_BARS};
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PARTIALS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    let theme = get_theme();
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} ", icons.visualizer))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let lines = if state.is_playing() {
        bar_lines(state, inner)
    } else {
        wave_lines(state, inner)
    };
    frame.render_widget(Paragraph::new(lines), inner);
}

fn bar_lines(state: &AppState, inner: Rect) -> Vec<Line<'static>> {
    let width = inner.width as usize;
    let height = inner.height as usize;

    // Eighth-block resolution per column.
    let levels: Vec<usize> = (0..width)
        .map(|x| {
            let bar = x * VISUALIZER_BARS / width.max(1);
            let value = state.visualizer.bars[bar.min(VISUALIZER_BARS - 1)];
            (value.clamp(0.0, 1.0) * (height * 8) as f32).round() as usize
        })
        .collect();
    let colors: Vec<Color> = (0..width)
        .map(|x| {
            let bar = x * VISUALIZER_BARS / width.max(1);
            bar_color(bar)
        })
        .collect();

    (0..height)
        .map(|row| {
            // Rows render top-down; cells fill bottom-up.
            let cell_floor = (height - 1 - row) * 8;
            let spans: Vec<Span> = (0..width)
                .map(|x| {
                    let above_floor = levels[x].saturating_sub(cell_floor);
                    let ch = match above_floor {
                        0 => ' ',
                        1..=7 => PARTIALS[above_floor - 1],
                        _ => '█',
                    };
                    Span::styled(ch.to_string(), Style::default().fg(colors[x]))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Idle animation: three overlapping sine waves with decreasing amplitude
/// and increasing frequency, drifting with the shared phase.
fn wave_lines(state: &AppState, inner: Rect) -> Vec<Line<'static>> {
    let width = inner.width as usize;
    let height = inner.height as usize;
    let theme = get_theme();
    let phase = state.visualizer.phase;

    let waves = [
        (0.9_f32, 0.25_f32, theme.palette.accent),
        (0.6, 0.45, theme.palette.fg_secondary),
        (0.35, 0.7, theme.palette.accent_alt),
    ];

    let mut grid = vec![vec![None::<Color>; width]; height];
    for (amp, freq, color) in waves {
        for x in 0..width {
            let t = x as f32 * freq + phase;
            let y = (height as f32 - 1.0) / 2.0 * (1.0 - amp * t.sin());
            let row = (y.round() as usize).min(height.saturating_sub(1));
            grid[row][x] = Some(color);
        }
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    Some(color) => Span::styled("·", Style::default().fg(color)),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Hue ramp across the bars, lows warm-cyan through highs violet.
fn bar_color(bar: usize) -> Color {
    let hue = 170.0 + 120.0 * bar as f32 / VISUALIZER_BARS as f32;
    let (r, g, b) = hsv_to_rgb(hue % 360.0, 0.55, 0.95);
    Color::Rgb(r, g, b)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), (255, 0, 0));
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), (0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), (0, 0, 255));
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        let (r, g, b) = hsv_to_rgb(200.0, 0.0, 0.5);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn bar_colors_differ_across_the_ramp() {
        assert_ne!(bar_color(0), bar_color(VISUALIZER_BARS - 1));
    }
}
