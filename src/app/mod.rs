pub mod actions;
pub mod events;
pub mod state;

use crate::api::{ApiError, Client};
use crate::config::Config;
use crate::input;
use crate::lyrics::LyricTrack;
use crate::player::mpv::MpvHandle;
use crate::player::PlaybackSession;
use crate::tui::{self, TuiTerminal};
use actions::Action;
use events::{Event, NetworkEvent, PlayerEvent};
use state::{AppState, Focus, Toast};
use std::time::Duration;
use tokio::sync::mpsc;

const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub struct App {
    cfg: Config,
    config_path: std::path::PathBuf,
    state: AppState,
    api: Client,
    mpv: Option<MpvHandle>,
}

impl App {
    pub fn new(cfg: Config, config_path: std::path::PathBuf) -> anyhow::Result<Self> {
        let api = Client::new(Duration::from_secs(cfg.search.timeout_secs))?;

        let mut state = AppState::new();
        state.volume = cfg.player.volume;
        state.backend = cfg.search.backend;

        Ok(Self {
            cfg,
            config_path,
            state,
            api,
            mpv: None,
        })
    }

    pub async fn run(&mut self, terminal: &mut TuiTerminal) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<Event>(256);

        input::spawn_input_task(tx.clone());
        spawn_tick_task(tx.clone());

        // mpv is best-effort: search and download still work without it.
        match MpvHandle::spawn(tx.clone()).await {
            Ok(h) => self.mpv = Some(h),
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "mpv unavailable");
                self.state.toast = Some(Toast::error(format!("playback disabled: {e:#}")));
            }
        }

        tui::draw(terminal, &mut self.state)?;

        while let Some(ev) = rx.recv().await {
            match ev {
                Event::Input(input_ev) => {
                    if let Some(action) = input::map_input_to_action(&self.state, input_ev) {
                        self.handle_action(action, &tx).await;
                    }
                }
                Event::Tick => self.on_tick(),
                Event::Player(pe) => self.handle_player(pe),
                Event::Network(ne) => self.handle_network(ne).await,
            }

            if self.state.should_quit {
                break;
            }

            tui::draw(terminal, &mut self.state)?;
        }

        self.save_state_on_quit();
        Ok(())
    }

    fn save_state_on_quit(&mut self) {
        self.cfg.player.volume = self.state.volume;
        self.cfg.search.backend = self.state.backend;
        let _ = crate::config::save(&self.cfg, Some(&self.config_path));
    }

    fn on_tick(&mut self) {
        self.state.tick = self.state.tick.wrapping_add(1);
        self.state.visualizer.step(self.state.is_playing());
        if let Some(session) = &self.state.session
            && session.is_playing()
        {
            self.state.lyrics.advance(session.position_ms);
        }
    }

    async fn handle_action(&mut self, action: Action, tx: &mpsc::Sender<Event>) {
        match action {
            Action::Quit => self.state.should_quit = true,
            Action::ToggleHelp => self.state.show_help = !self.state.show_help,
            Action::Resize => {}

            Action::InputChar(c) => self.state.query.push(c),
            Action::Backspace => {
                self.state.query.pop();
            }
            Action::ClearInput => self.state.query.clear(),
            Action::FocusInput => self.state.focus = Focus::Input,
            Action::FocusResults => {
                if self.state.page.is_some() {
                    self.state.focus = Focus::Results;
                }
            }

            Action::StartSearch => {
                let query = self.state.query.trim().to_string();
                if query.is_empty() {
                    self.state.status = "Type a query first".into();
                    return;
                }
                self.spawn_search(query, 0, tx);
            }
            Action::Refresh => {
                if let (Some(query), Some(page)) =
                    (self.state.last_query.clone(), self.state.page.as_ref())
                {
                    let page_index = page.page_index;
                    self.spawn_search(query, page_index, tx);
                }
            }
            Action::NextPage => {
                if let (Some(query), Some(page)) =
                    (self.state.last_query.clone(), self.state.page.as_ref())
                    && page.has_next()
                {
                    let next = page.page_index + 1;
                    self.spawn_search(query, next, tx);
                }
            }
            Action::PrevPage => {
                if let (Some(query), Some(page)) =
                    (self.state.last_query.clone(), self.state.page.as_ref())
                    && page.has_prev()
                {
                    let prev = page.page_index - 1;
                    self.spawn_search(query, prev, tx);
                }
            }
            Action::SwitchBackend => {
                self.state.backend = self.state.backend.toggle();
                self.state.toast = Some(Toast::info(format!(
                    "Backend: {} (takes effect on next search)",
                    self.state.backend
                )));
            }

            Action::ListUp => self.state.select_prev(),
            Action::ListDown => self.state.select_next(),
            Action::GoTop => self.state.selected = 0,
            Action::GoBottom => self.state.select_last(),

            Action::PlaySelected => self.play_selected(tx).await,
            Action::TogglePause => {
                if let Some(session) = &self.state.session
                    && !session.is_stopped()
                    && let Some(mpv) = &self.mpv
                    && let Err(e) = mpv.toggle_pause().await
                {
                    self.state.status = format!("mpv error: {e:#}");
                }
            }
            Action::Stop => self.stop_playback().await,
            Action::PlayNext | Action::PlayPrev => {
                // No playlist model yet; say so instead of guessing one.
                self.state.toast = Some(Toast::info("Prev/next track is not implemented"));
            }
            Action::VolumeUp => self.set_volume(self.state.volume.saturating_add(5).min(100)).await,
            Action::VolumeDown => self.set_volume(self.state.volume.saturating_sub(5)).await,
            Action::SeekForward => {
                if let Some(mpv) = &self.mpv {
                    let _ = mpv.seek_relative(10.0).await;
                }
            }
            Action::SeekBack => {
                if let Some(mpv) = &self.mpv {
                    let _ = mpv.seek_relative(-10.0).await;
                }
            }

            Action::DownloadSelected => self.spawn_download(tx),
        }
    }

    async fn set_volume(&mut self, volume: u8) {
        self.state.volume = volume;
        if let Some(mpv) = &self.mpv {
            let _ = mpv.set_volume(volume).await;
        }
    }

    async fn stop_playback(&mut self) {
        if let Some(mpv) = &self.mpv {
            let _ = mpv.stop().await;
        }
        if let Some(session) = &mut self.state.session {
            session.stop();
        }
        self.state.lyrics.clear();
        // Drop the pending-fetch marker too, or a lyrics response still in
        // flight would repopulate the pane after the stop.
        self.state.lyrics_track_id = None;
        self.state.status = "Stopped".into();
    }

    async fn play_selected(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.resolving {
            return;
        }
        let Some(track) = self.state.selected_track().cloned() else {
            self.state.status = "Nothing selected".into();
            return;
        };

        // Unload whatever is playing before the new stream resolves, so a
        // failed resolve leaves a stopped session, not a stale one.
        self.stop_playback().await;

        self.state.resolving = true;
        self.state.status = format!("Resolving: {}", track.title);

        self.spawn_lyrics_fetch(&track, tx);

        let api = self.api.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.resolve(&track.id, track.source).await {
                Ok(url) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::ResolvedStream { track, url }))
                        .await;
                }
                Err(e) => {
                    tracing::error!(track_id = %track.id, error = %e, "resolve failed");
                    let _ = tx
                        .send(Event::Network(NetworkEvent::ResolveFailed {
                            message: format!("{e} ({})", e.hint()),
                        }))
                        .await;
                }
            }
        });
    }

    fn spawn_search(&mut self, query: String, page: usize, tx: &mpsc::Sender<Event>) {
        if self.state.searching {
            return;
        }
        self.state.searching = true;
        self.state.status = format!("Searching: {query}");

        let api = self.api.clone();
        let backend = self.state.backend;
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.search(&query, page, backend).await {
                Ok(page) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::SearchPage { query, page }))
                        .await;
                }
                Err(e) => {
                    tracing::error!(%query, error = %e, "search failed");
                    let _ = tx
                        .send(Event::Network(NetworkEvent::SearchFailed {
                            message: format!("{e} ({})", e.hint()),
                        }))
                        .await;
                }
            }
        });
    }

    fn spawn_lyrics_fetch(&mut self, track: &crate::api::Track, tx: &mpsc::Sender<Event>) {
        self.state.lyrics.begin_loading();
        self.state.lyrics_track_id = Some(track.id.clone());

        let api = self.api.clone();
        let id = track.id.clone();
        let source = track.source;
        let tx = tx.clone();
        tokio::spawn(async move {
            match api.lyrics(&id, source).await {
                Ok(raw) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::LyricsLoaded {
                            track_id: id,
                            track: LyricTrack::parse(&raw),
                        }))
                        .await;
                }
                Err(e) => {
                    // Lyrics are decoration; failure degrades to "no lyrics".
                    tracing::warn!(track_id = %id, error = %e, "lyrics unavailable");
                    let _ = tx
                        .send(Event::Network(NetworkEvent::LyricsUnavailable { track_id: id }))
                        .await;
                }
            }
        });
    }

    fn spawn_download(&mut self, tx: &mpsc::Sender<Event>) {
        if self.state.downloading {
            self.state.status = "A download is already running".into();
            return;
        }
        let Some(track) = self.state.selected_track().cloned() else {
            self.state.status = "Nothing selected".into();
            return;
        };

        self.state.downloading = true;
        self.state.status = format!("Downloading: {}", track.title);

        let api = self.api.clone();
        let dir = self.cfg.paths.downloads_dir.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            match crate::download::download_track(&api, &track, &dir).await {
                Ok(path) => {
                    let _ = tx
                        .send(Event::Network(NetworkEvent::DownloadFinished { path }))
                        .await;
                }
                Err(e) => {
                    tracing::error!(track_id = %track.id, error = %format!("{e:#}"), "download failed");
                    let message = match e.downcast_ref::<ApiError>() {
                        Some(api_err) => format!("{api_err} ({})", api_err.hint()),
                        None => format!("{e:#}"),
                    };
                    let _ = tx
                        .send(Event::Network(NetworkEvent::DownloadFailed { message }))
                        .await;
                }
            }
        });
    }

    fn handle_player(&mut self, pe: PlayerEvent) {
        match pe {
            PlayerEvent::Started => {
                if let Some(session) = &mut self.state.session {
                    session.set_paused(false);
                }
            }
            PlayerEvent::Paused => {
                if let Some(session) = &mut self.state.session {
                    session.set_paused(true);
                }
            }
            PlayerEvent::Position { ms } => {
                if let Some(session) = &mut self.state.session {
                    session.position_ms = ms;
                }
            }
            PlayerEvent::Duration { ms } => {
                if let Some(session) = &mut self.state.session {
                    session.duration_ms = ms;
                }
            }
            PlayerEvent::Ended => {
                if let Some(session) = &mut self.state.session {
                    session.finish();
                }
                self.state.status = "Playback ended".into();
                self.state.toast = Some(Toast::info("End of track (prev/next not implemented)"));
            }
            PlayerEvent::Error(e) => self.state.status = format!("Player: {e}"),
        }
    }

    async fn handle_network(&mut self, ne: NetworkEvent) {
        match ne {
            NetworkEvent::SearchPage { query, page } => {
                self.state.searching = false;
                self.state.last_query = Some(query);
                self.state.selected = 0;
                if page.tracks.is_empty() {
                    self.state.status = "No results".into();
                    self.state.focus = Focus::Input;
                } else {
                    self.state.status = format!(
                        "Page {}/{} ({} on {})",
                        page.page_index + 1,
                        page.total_pages,
                        page.tracks.len(),
                        self.state.backend
                    );
                    self.state.focus = Focus::Results;
                }
                self.state.page = Some(page);
            }
            NetworkEvent::SearchFailed { message } => {
                self.state.searching = false;
                self.state.toast = Some(Toast::error(message));
            }
            NetworkEvent::ResolvedStream { track, url } => {
                self.state.resolving = false;
                self.state.status = format!("Playing: {}", track.display_line());
                self.state.session = Some(PlaybackSession::start(track, url.clone()));
                if let Some(mpv) = &self.mpv {
                    let _ = mpv.set_volume(self.state.volume).await;
                    if let Err(e) = mpv.load_url(&url).await {
                        if let Some(session) = &mut self.state.session {
                            session.stop();
                        }
                        self.state.status = format!("mpv load failed: {e:#}");
                    }
                } else {
                    if let Some(session) = &mut self.state.session {
                        session.stop();
                    }
                    self.state.status = "mpv not available".into();
                }
            }
            NetworkEvent::ResolveFailed { message } => {
                self.state.resolving = false;
                self.state.toast = Some(Toast::error(message));
            }
            NetworkEvent::LyricsLoaded { track_id, track } => {
                if self.state.lyrics_track_id.as_deref() == Some(track_id.as_str()) {
                    self.state.lyrics.set_track(track);
                }
            }
            NetworkEvent::LyricsUnavailable { track_id } => {
                if self.state.lyrics_track_id.as_deref() == Some(track_id.as_str()) {
                    self.state.lyrics.set_unavailable();
                }
            }
            NetworkEvent::DownloadFinished { path } => {
                self.state.downloading = false;
                self.state.toast = Some(Toast::success(format!("Saved {}", path.display())));
                self.state.status = String::new();
            }
            NetworkEvent::DownloadFailed { message } => {
                self.state.downloading = false;
                self.state.toast = Some(Toast::error(message));
            }
        }
    }
}

fn spawn_tick_task(tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tx.send(Event::Tick).await.is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(Config::default(), std::path::PathBuf::from("config.toml")).unwrap()
    }

    #[tokio::test]
    async fn stop_discards_lyrics_still_in_flight() {
        let mut app = test_app();
        app.state.lyrics.begin_loading();
        app.state.lyrics_track_id = Some("42".into());

        app.stop_playback().await;
        assert!(app.state.lyrics_track_id.is_none());

        // The fetch lands after the stop; the pane must stay cleared.
        app.handle_network(NetworkEvent::LyricsLoaded {
            track_id: "42".into(),
            track: LyricTrack::parse("[00:01.00]late line"),
        })
        .await;
        assert!(!app.state.lyrics.has_lyrics());
        assert!(!app.state.lyrics.no_lyrics());
    }
}
