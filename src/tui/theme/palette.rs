//! Color palette - deep blue with cyan accents

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub struct Palette {
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_highlight: Color,
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub border: Color,
    pub playing: Color,
    pub error: Color,
}

impl Palette {
    pub const CHROMA: Self = Self {
        bg_primary: Color::Rgb(26, 26, 46),       // #1a1a2e deep night blue
        bg_secondary: Color::Rgb(22, 33, 62),     // #16213e
        bg_highlight: Color::Rgb(74, 111, 165),   // #4a6fa5 selection blue
        fg_primary: Color::Rgb(224, 251, 252),    // #e0fbfc pale cyan
        fg_secondary: Color::Rgb(152, 193, 217),  // #98c1d9 muted blue
        accent: Color::Rgb(168, 218, 220),        // #a8dadc cyan accent
        accent_alt: Color::Rgb(61, 90, 128),      // #3d5a80 steel blue
        border: Color::Rgb(61, 90, 128),          // #3d5a80
        playing: Color::Rgb(168, 218, 220),       // #a8dadc
        error: Color::Rgb(230, 111, 81),          // #e66f51 warm alert
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::CHROMA
    }
}
