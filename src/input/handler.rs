use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    Quit,
    None,
}

/// Maps key presses to engine commands
///
/// Reversing presses are forwarded as-is; the engine decides whether a turn
/// is legal.
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
            KeyCode::Up => KeyAction::Game(Command::SetDirection(Direction::Up)),
            KeyCode::Down => KeyAction::Game(Command::SetDirection(Direction::Down)),
            KeyCode::Left => KeyAction::Game(Command::SetDirection(Direction::Left)),
            KeyCode::Right => KeyAction::Game(Command::SetDirection(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Game(Command::SetDirection(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Game(Command::SetDirection(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Game(Command::SetDirection(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Game(Command::SetDirection(Direction::Right))
            }

            // Controls
            KeyCode::Char(' ') => KeyAction::Game(Command::TogglePause),
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                KeyAction::Game(Command::Start)
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
