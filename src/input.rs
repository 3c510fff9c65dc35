//! Key bindings: arrows, WASD and vim keys.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    RotateCw,
    /// Held; released on key-up.
    SoftDrop,
    Pause,
    Restart,
    Start,
    Quit,
    None,
}

pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return Action::None;
    }
    let code = match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('r') => Action::Restart,
        KeyCode::Enter => Action::Start,
        KeyCode::Left | KeyCode::Char('a' | 'h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'l') => Action::MoveRight,
        KeyCode::Up | KeyCode::Char('w' | 'k' | ' ') => Action::RotateCw,
        KeyCode::Down | KeyCode::Char('s' | 'j') => Action::SoftDrop,
        _ => Action::None,
    }
}
