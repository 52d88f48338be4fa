use crate::api::{SearchPage, Source, Track};
use crate::lyrics::LyricView;
use crate::player::PlaybackSession;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: std::time::Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::with_kind(message, ToastKind::Info)
    }

    fn with_kind(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: std::time::Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > std::time::Duration::from_secs(3)
    }
}

pub const VISUALIZER_BARS: usize = 32;

/// Synthetic spectrum animation. The magnitudes never come from the audio
/// signal; they are random band targets shaped by a shared phase and
/// smoothed against the previous frame.
#[derive(Debug, Clone)]
pub struct Visualizer {
    pub bars: [f32; VISUALIZER_BARS],
    pub phase: f32,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self {
            bars: [0.0; VISUALIZER_BARS],
            phase: 0.0,
        }
    }
}

impl Visualizer {
    /// One 50 ms step. The phase always advances (it drives the idle wave
    /// too); bars only move while audio is playing.
    pub fn step(&mut self, playing: bool) {
        self.phase += 0.1;
        if self.phase > std::f32::consts::TAU {
            self.phase -= std::f32::consts::TAU;
        }
        if !playing {
            return;
        }
        let mut rng = rand::rng();
        for (i, bar) in self.bars.iter_mut().enumerate() {
            let f = i as f32;
            let target = if i < VISUALIZER_BARS * 3 / 10 {
                // lows: tall and steady
                0.3 + 0.4 * rng.random::<f32>() + 0.2 * (self.phase * 0.05).sin()
            } else if i < VISUALIZER_BARS * 7 / 10 {
                // mids
                0.2 + 0.6 * rng.random::<f32>() * (0.5 + 0.5 * (self.phase * 0.1 + f * 0.1).sin())
            } else {
                // highs: short and jittery
                0.1 + 0.3 * rng.random::<f32>() * (0.5 + 0.5 * (self.phase * 0.2 + f * 0.2).sin())
            };
            *bar = *bar * 0.7 + target.clamp(0.0, 1.0) * 0.3;
        }
    }
}

pub struct AppState {
    pub should_quit: bool,
    pub tick: u64,
    pub show_help: bool,

    // Search
    pub query: String,
    pub focus: Focus,
    pub backend: Source,
    pub page: Option<SearchPage>,
    pub last_query: Option<String>,
    pub selected: usize,
    pub searching: bool,

    // Playback
    pub session: Option<PlaybackSession>,
    pub resolving: bool,
    pub volume: u8,

    // Lyrics
    pub lyrics: LyricView,
    pub lyrics_track_id: Option<String>,

    // Download
    pub downloading: bool,

    pub visualizer: Visualizer,
    pub toast: Option<Toast>,
    pub status: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            tick: 0,
            show_help: false,
            query: String::new(),
            focus: Focus::Input,
            backend: Source::Primary,
            page: None,
            last_query: None,
            selected: 0,
            searching: false,
            session: None,
            resolving: false,
            volume: 70,
            lyrics: LyricView::default(),
            lyrics_track_id: None,
            downloading: false,
            visualizer: Visualizer::default(),
            toast: None,
            status: String::new(),
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.page.as_ref()?.tracks.get(self.selected)
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if let Some(page) = &self.page
            && !page.tracks.is_empty()
        {
            self.selected = (self.selected + 1).min(page.tracks.len() - 1);
        }
    }

    pub fn select_last(&mut self) {
        if let Some(page) = &self.page {
            self.selected = page.tracks.len().saturating_sub(1);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_playing())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visualizer_phase_wraps_at_tau() {
        let mut v = Visualizer::default();
        for _ in 0..100 {
            v.step(true);
        }
        assert!(v.phase <= std::f32::consts::TAU);
        assert!(v.phase >= 0.0);
    }

    #[test]
    fn visualizer_bars_hold_still_when_idle() {
        let mut v = Visualizer::default();
        v.step(true);
        let before = v.bars;
        v.step(false);
        assert_eq!(v.bars, before);
    }

    #[test]
    fn visualizer_bars_stay_in_unit_range() {
        let mut v = Visualizer::default();
        for _ in 0..500 {
            v.step(true);
        }
        for bar in v.bars {
            assert!((0.0..=1.0).contains(&bar), "bar out of range: {bar}");
        }
    }

    #[test]
    fn selection_clamps_to_page() {
        let mut state = AppState::new();
        state.select_next();
        assert_eq!(state.selected, 0);
        state.page = Some(SearchPage {
            tracks: vec![],
            page_index: 0,
            total_pages: 0,
        });
        state.select_next();
        assert_eq!(state.selected, 0);
    }
}
