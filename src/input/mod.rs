use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, Focus};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                match event::read() {
                    Ok(CtEvent::Key(k)) => {
                        if k.kind == KeyEventKind::Press
                            && tx.blocking_send(Event::Input(InputEvent::Key(k))).is_err()
                        {
                            break;
                        }
                    }
                    Ok(CtEvent::Mouse(m)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Mouse(m))).is_err() {
                            break;
                        }
                    }
                    Ok(CtEvent::Resize(_, _)) => {
                        if tx.blocking_send(Event::Input(InputEvent::Resize)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => {}
                }
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => {
            if state.show_help {
                return handle_help_screen(k);
            }
            match state.focus {
                Focus::Input => handle_input_focus(state, k),
                Focus::Results => handle_results_focus(k),
            }
        }
    }
}

fn handle_help_screen(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => {
            Some(Action::ToggleHelp)
        }
        _ => None,
    }
}

fn handle_input_focus(state: &AppState, k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Enter => Some(Action::StartSearch),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Tab => Some(Action::SwitchBackend),
        KeyCode::Down if state.page.is_some() => Some(Action::FocusResults),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearInput)
        }
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn handle_results_focus(k: crossterm::event::KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('i') => Some(Action::FocusInput),

        // Navigation - vim style
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),

        // Pagination
        KeyCode::Char('n') | KeyCode::Right => Some(Action::NextPage),
        KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevPage),
        KeyCode::Char('r') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Refresh),
        KeyCode::F(5) => Some(Action::Refresh),
        KeyCode::Char('b') => Some(Action::SwitchBackend),

        // Playback
        KeyCode::Enter => Some(Action::PlaySelected),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('s') => Some(Action::Stop),
        KeyCode::Char('.') | KeyCode::Char('>') => Some(Action::PlayNext),
        KeyCode::Char(',') | KeyCode::Char('<') => Some(Action::PlayPrev),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::VolumeUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::VolumeDown),
        KeyCode::Char(']') => Some(Action::SeekForward),
        KeyCode::Char('[') => Some(Action::SeekBack),

        // Files
        KeyCode::Char('d') => Some(Action::DownloadSelected),

        KeyCode::Char('?') | KeyCode::F(1) => Some(Action::ToggleHelp),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn typing_goes_to_query_in_input_focus() {
        let state = AppState::new();
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('q'))),
            Some(Action::InputChar('q'))
        );
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Enter)),
            Some(Action::StartSearch)
        );
    }

    #[test]
    fn results_focus_has_playback_keys() {
        let mut state = AppState::new();
        state.focus = Focus::Results;
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Enter)),
            Some(Action::PlaySelected)
        );
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('n'))),
            Some(Action::NextPage)
        );
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('d'))),
            Some(Action::DownloadSelected)
        );
    }

    #[test]
    fn help_screen_swallows_everything_but_close_keys() {
        let mut state = AppState::new();
        state.show_help = true;
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('?'))),
            Some(Action::ToggleHelp)
        );
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('x'))), None);
    }
}
