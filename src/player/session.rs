//! What is currently loaded and whether it is audible.

use crate::api::models::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Stopped => "stopped",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }
}

/// One loaded track. A successful resolve starts playback immediately, so
/// a session is born Playing. The resolved URL survives a stop so the
/// track can still be downloaded afterwards.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    pub track: Track,
    pub resolved_url: String,
    pub duration_ms: u64,
    pub position_ms: u64,
    pub state: PlaybackState,
}

impl PlaybackSession {
    pub fn start(track: Track, resolved_url: String) -> Self {
        Self {
            track,
            resolved_url,
            duration_ms: 0,
            position_ms: 0,
            state: PlaybackState::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_stopped(&self) -> bool {
        self.state == PlaybackState::Stopped
    }

    /// Pause/resume reported by the engine. A stopped session has nothing
    /// loaded, so engine pause flips arriving late are ignored.
    pub fn set_paused(&mut self, paused: bool) {
        if self.state == PlaybackState::Stopped {
            return;
        }
        self.state = if paused {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        };
    }

    /// Stop rewinds to the start.
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position_ms = 0;
    }

    /// End of stream behaves like an explicit stop.
    pub fn finish(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::Source;

    fn session() -> PlaybackSession {
        PlaybackSession::start(
            Track {
                id: "42".into(),
                title: "T".into(),
                artist: "A".into(),
                album: None,
                source: Source::Primary,
            },
            "https://cdn.example/t.mp3".into(),
        )
    }

    #[test]
    fn starts_playing() {
        let s = session();
        assert_eq!(s.state, PlaybackState::Playing);
        assert_eq!(s.position_ms, 0);
    }

    #[test]
    fn pause_toggles_between_playing_and_paused() {
        let mut s = session();
        s.set_paused(true);
        assert_eq!(s.state, PlaybackState::Paused);
        s.set_paused(false);
        assert_eq!(s.state, PlaybackState::Playing);
    }

    #[test]
    fn stop_resets_position_and_keeps_url() {
        let mut s = session();
        s.position_ms = 93_000;
        s.stop();
        assert_eq!(s.state, PlaybackState::Stopped);
        assert_eq!(s.position_ms, 0);
        assert!(!s.resolved_url.is_empty());
    }

    #[test]
    fn stopped_session_ignores_pause_flips() {
        let mut s = session();
        s.stop();
        s.set_paused(false);
        assert_eq!(s.state, PlaybackState::Stopped);
        s.set_paused(true);
        assert_eq!(s.state, PlaybackState::Stopped);
    }

    #[test]
    fn end_of_stream_is_a_stop() {
        let mut s = session();
        s.position_ms = 180_000;
        s.finish();
        assert_eq!(s.state, PlaybackState::Stopped);
        assert_eq!(s.position_ms, 0);
    }
}
