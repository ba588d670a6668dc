//! Key bindings: arrows, WASD and vim-style letters.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use wordtrix::Intent;

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play(Intent),
    Pause,
    Restart,
    Quit,
    None,
}

/// Map a key event to an action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    if modifiers == KeyModifiers::CONTROL {
        return match code {
            KeyCode::Char('c') => Action::Quit,
            _ => Action::None,
        };
    }
    if !modifiers.is_empty() && modifiers != KeyModifiers::SHIFT {
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
        KeyCode::Left | KeyCode::Char('a' | 'h') => Action::Play(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('d' | 'l') => Action::Play(Intent::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => Action::Play(Intent::SoftDrop),
        KeyCode::Up | KeyCode::Char('w' | 'f') => Action::Play(Intent::Flip),
        KeyCode::Char('k' | 'x') => Action::Play(Intent::RotateCw),
        KeyCode::Char('j' | 'z') => Action::Play(Intent::RotateCcw),
        KeyCode::Char(' ') | KeyCode::Enter => Action::Play(Intent::HardCommit),
        _ => Action::None,
    }
}
