//! Key mapping from terminal events to game events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::InputEvent;

/// Map keyboard input to game events.
pub fn map_key_event(key: KeyEvent) -> Option<InputEvent> {
    match key.code {
        // Movement
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(InputEvent::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(InputEvent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(InputEvent::MoveRight),

        // Rotation
        KeyCode::Up | KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Char('w') => {
            Some(InputEvent::Rotate)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
