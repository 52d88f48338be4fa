//! LRC transcript parsing and playback-synchronized display state.

pub mod parser;
pub mod sync;

pub use parser::{LyricLine, LyricTrack};
pub use sync::{LyricView, WINDOW_SLOTS};
