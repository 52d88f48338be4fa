//! Playback: the external mpv engine and the session state machine.

pub mod mpv;
pub mod session;

pub use session::{PlaybackSession, PlaybackState};
