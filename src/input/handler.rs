use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Signal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Session(Signal),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Session(Direction::Up.into()),
            KeyCode::Down => KeyAction::Session(Direction::Down.into()),
            KeyCode::Left => KeyAction::Session(Direction::Left.into()),
            KeyCode::Right => KeyAction::Session(Direction::Right.into()),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Session(Direction::Up.into()),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Session(Direction::Down.into()),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Session(Direction::Left.into()),
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Session(Direction::Right.into())
            }

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Session(Signal::Restart)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
