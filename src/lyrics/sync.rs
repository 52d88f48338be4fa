//! Current-line tracking and the fixed display window.

use super::parser::LyricTrack;

/// Slots in the lyrics pane; the active line sits in the middle one.
pub const WINDOW_SLOTS: usize = 7;
const WINDOW_RADIUS: i64 = WINDOW_SLOTS as i64 / 2;

/// Display state for the lyrics pane. `advance` is cheap to call on every
/// tick; it reports whether the active line actually moved so the window
/// contents only change then.
#[derive(Debug, Clone, Default)]
pub struct LyricView {
    track: Option<LyricTrack>,
    current: Option<usize>,
    loading: bool,
    unavailable: bool,
}

impl LyricView {
    pub fn begin_loading(&mut self) {
        *self = Self {
            loading: true,
            ..Self::default()
        };
    }

    /// Install a fetched track. An empty parse degrades to the
    /// no-lyrics display state rather than showing a blank pane forever.
    pub fn set_track(&mut self, track: LyricTrack) {
        if track.is_empty() {
            self.set_unavailable();
            return;
        }
        *self = Self {
            track: Some(track),
            ..Self::default()
        };
    }

    pub fn set_unavailable(&mut self) {
        *self = Self {
            unavailable: true,
            ..Self::default()
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn no_lyrics(&self) -> bool {
        self.unavailable
    }

    pub fn has_lyrics(&self) -> bool {
        self.track.is_some()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Recompute the active line for `elapsed_ms`; true when it changed.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let Some(track) = &self.track else {
            return false;
        };
        let next = track.current_line(elapsed_ms);
        if next == self.current {
            false
        } else {
            self.current = next;
            true
        }
    }

    /// The fixed window `[current-3 ..= current+3]`. Slots that fall
    /// outside the track are `None`; before the first timestamp the
    /// upcoming lines fill the lower half and the middle slot is blank.
    pub fn window(&self) -> [Option<&str>; WINDOW_SLOTS] {
        let mut slots = [None; WINDOW_SLOTS];
        let Some(track) = &self.track else {
            return slots;
        };
        let center = self.current.map(|c| c as i64).unwrap_or(-1);
        for (slot, item) in slots.iter_mut().enumerate() {
            let idx = center + slot as i64 - WINDOW_RADIUS;
            if idx >= 0 {
                *item = track.get(idx as usize).map(|l| l.text.as_str());
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_with(raw: &str) -> LyricView {
        let mut view = LyricView::default();
        view.set_track(LyricTrack::parse(raw));
        view
    }

    #[test]
    fn advance_reports_change_only_when_line_moves() {
        let mut view = view_with("[00:10.00]a\n[00:20.00]b");
        assert!(!view.advance(0));
        assert!(!view.advance(5_000));
        assert!(view.advance(10_000));
        assert!(!view.advance(12_000));
        assert!(!view.advance(12_000));
        assert!(view.advance(20_000));
        assert_eq!(view.current(), Some(1));
    }

    #[test]
    fn window_before_first_line_fills_lower_half() {
        let view = view_with("[00:10.00]a\n[00:20.00]b\n[00:30.00]c");
        let w = view.window();
        assert_eq!(w[..4], [None, None, None, None]);
        assert_eq!(w[4], Some("a"));
        assert_eq!(w[5], Some("b"));
        assert_eq!(w[6], Some("c"));
    }

    #[test]
    fn window_centers_active_line() {
        let raw = "[00:01.00]l0\n[00:02.00]l1\n[00:03.00]l2\n[00:04.00]l3\n\
                   [00:05.00]l4\n[00:06.00]l5\n[00:07.00]l6\n[00:08.00]l7";
        let mut view = view_with(raw);
        view.advance(4_000); // l3 active
        let w = view.window();
        assert_eq!(w[0], Some("l0"));
        assert_eq!(w[3], Some("l3"));
        assert_eq!(w[6], Some("l6"));
    }

    #[test]
    fn window_blanks_past_the_end() {
        let mut view = view_with("[00:01.00]a\n[00:02.00]b");
        view.advance(120_000); // last line active
        let w = view.window();
        assert_eq!(w[2], Some("a"));
        assert_eq!(w[3], Some("b"));
        assert_eq!(w[4..], [None, None, None]);
    }

    #[test]
    fn empty_parse_degrades_to_no_lyrics() {
        let mut view = LyricView::default();
        view.set_track(LyricTrack::parse("nothing usable"));
        assert!(view.no_lyrics());
        assert!(!view.has_lyrics());
        assert!(!view.advance(10_000));
    }

    #[test]
    fn set_track_replaces_loading_state() {
        let mut view = LyricView::default();
        view.begin_loading();
        assert!(view.is_loading());
        view.set_track(LyricTrack::parse("[00:01.00]a"));
        assert!(!view.is_loading());
        assert!(view.has_lyrics());
        assert_eq!(view.current(), None);
    }
}
