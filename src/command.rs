use crate::game::SessionState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A player action, independent of the key used to trigger it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    TogglePause,
    Start,
    Restart,
    ToMenu,
    Quit,
}

impl Command {
    /// Map a key press to a command.  The space bar starts a game from the
    /// menu and toggles pausing everywhere else, so the current session state
    /// is needed to interpret it.
    pub(crate) fn from_key_event(ev: KeyEvent, state: SessionState) -> Option<Command> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(Command::Quit);
        } else if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k') | KeyCode::Up => Some(Command::MoveUp),
            KeyCode::Char('s' | 'j') | KeyCode::Down => Some(Command::MoveDown),
            KeyCode::Char('a' | 'h') | KeyCode::Left => Some(Command::MoveLeft),
            KeyCode::Char('d' | 'l') | KeyCode::Right => Some(Command::MoveRight),
            KeyCode::Char(' ') if state == SessionState::Menu => Some(Command::Start),
            KeyCode::Char(' ' | 'p') => Some(Command::TogglePause),
            KeyCode::Enter => Some(Command::Start),
            KeyCode::Char('r') => Some(Command::Restart),
            KeyCode::Esc | KeyCode::Char('m') => Some(Command::ToMenu),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        }
    }
}
