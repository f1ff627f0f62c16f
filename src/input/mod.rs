//! Input module - keyboard handling for game controls

pub mod handler;

pub use handler::InputHandler;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::GameAction;

/// Map a key press to a game action.
///
/// Movement is exactly the four arrow keys; Enter starts (or restarts) a
/// round. Everything else is silently ignored.
pub fn map_key(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Up => Some(GameAction::MoveUp),
        KeyCode::Down => Some(GameAction::MoveDown),
        KeyCode::Enter => Some(GameAction::Start),
        _ => None,
    }
}

/// Check if a key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
