//! User intents, produced by the input mapper.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleHelp,
    Resize,

    // Query editing
    InputChar(char),
    Backspace,
    ClearInput,
    FocusInput,
    FocusResults,

    // Search / pagination
    StartSearch,
    Refresh,
    NextPage,
    PrevPage,
    SwitchBackend,

    // List navigation
    ListUp,
    ListDown,
    GoTop,
    GoBottom,

    // Playback
    PlaySelected,
    TogglePause,
    Stop,
    PlayNext,
    PlayPrev,
    VolumeUp,
    VolumeDown,
    SeekForward,
    SeekBack,

    // Files
    DownloadSelected,
}
