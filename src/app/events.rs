//! Everything the app loop can wake up on.

use crate::api::{SearchPage, Track};
use crate::lyrics::LyricTrack;
use crossterm::event::{KeyEvent, MouseEvent};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    /// 50 ms animation tick: visualizer phase and lyric refresh.
    Tick,
    Player(PlayerEvent),
    Network(NetworkEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
}

/// Events from the mpv IPC pump.
#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Started,
    Paused,
    Position { ms: u64 },
    Duration { ms: u64 },
    Ended,
    Error(String),
}

/// Results coming back from spawned network tasks.
#[derive(Debug, Clone)]
pub enum NetworkEvent {
    SearchPage {
        query: String,
        page: SearchPage,
    },
    SearchFailed {
        message: String,
    },
    ResolvedStream {
        track: Track,
        url: String,
    },
    ResolveFailed {
        message: String,
    },
    LyricsLoaded {
        track_id: String,
        track: LyricTrack,
    },
    LyricsUnavailable {
        track_id: String,
    },
    DownloadFinished {
        path: PathBuf,
    },
    DownloadFailed {
        message: String,
    },
}
