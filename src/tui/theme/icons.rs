//! Plain-Unicode glyph set, no special font required.

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Icons {
    // Playback controls
    pub play: &'static str,
    pub pause: &'static str,
    pub stop: &'static str,
    pub next: &'static str,
    pub prev: &'static str,

    // Volume
    pub volume: &'static str,
    pub volume_mute: &'static str,

    // Panels
    pub search: &'static str,
    pub music: &'static str,
    pub lyrics: &'static str,
    pub visualizer: &'static str,
    pub help: &'static str,
    pub download: &'static str,

    // Status
    pub success: &'static str,
    pub error: &'static str,
    pub info: &'static str,

    // Selection
    pub selected: &'static str,
    pub unselected: &'static str,

    // Progress bar
    pub progress_full: &'static str,
    pub progress_empty: &'static str,
    pub progress_head: &'static str,

    pub bullet: &'static str,
}

impl Icons {
    pub const fn media() -> Self {
        Self {
            play: "▶",
            pause: "⏸",
            stop: "⏹",
            next: "⏭",
            prev: "⏮",

            volume: "♪",
            volume_mute: "∅",

            search: "⌕",
            music: "♫",
            lyrics: "≡",
            visualizer: "▁▃▅",
            help: "?",
            download: "↓",

            success: "✔",
            error: "✘",
            info: "•",

            selected: "❯",
            unselected: " ",

            progress_full: "━",
            progress_empty: "─",
            progress_head: "●",

            bullet: "•",
        }
    }
}

impl Default for Icons {
    fn default() -> Self {
        Self::media()
    }
}

/// Loading spinner frames
pub struct LoadingSpinner;

impl LoadingSpinner {
    /// Braille-based smooth spinner
    pub const BRAILLE: [&'static str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

    pub fn frame(tick: u64) -> &'static str {
        let idx = (tick / 4) as usize % Self::BRAILLE.len();
        Self::BRAILLE[idx]
    }
}
