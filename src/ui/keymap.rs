//! Keyboard to controller mapping

use crate::screen::controls::{Buttons, ControllerInput};
use crossterm::event::{KeyCode, KeyEvent};

/// What a key press asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward a controller snapshot to the crash screen
    Controller(ControllerInput),
    /// Print the active page to the output buffer
    Print,
    Quit,
}

/// Map a key press. Unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<KeyAction> {
    let input = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => return Some(KeyAction::Print),
        KeyCode::Up => ControllerInput::up(),
        KeyCode::Down => ControllerInput::down(),
        KeyCode::Left => ControllerInput::left(),
        KeyCode::Right => ControllerInput::right(),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Enter => {
            ControllerInput::buttons(Buttons::A)
        }
        KeyCode::Char('b') | KeyCode::Char('B') | KeyCode::Backspace => {
            ControllerInput::buttons(Buttons::B)
        }
        KeyCode::Char('[') => ControllerInput::buttons(Buttons::L),
        KeyCode::Char(']') => ControllerInput::buttons(Buttons::R),
        KeyCode::Char('s') | KeyCode::Char('S') => ControllerInput::buttons(Buttons::START),
        _ => return None,
    };
    Some(KeyAction::Controller(input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_direction_keys() {
        assert_eq!(
            map_key(key(KeyCode::Up)),
            Some(KeyAction::Controller(ControllerInput::up()))
        );
        assert_eq!(
            map_key(key(KeyCode::Right)),
            Some(KeyAction::Controller(ControllerInput::right()))
        );
    }

    #[test]
    fn test_button_keys() {
        assert_eq!(
            map_key(key(KeyCode::Enter)),
            Some(KeyAction::Controller(ControllerInput::buttons(Buttons::A)))
        );
        assert_eq!(
            map_key(key(KeyCode::Char(']'))),
            Some(KeyAction::Controller(ControllerInput::buttons(Buttons::R)))
        );
        assert_eq!(map_key(key(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(map_key(key(KeyCode::Char('p'))), Some(KeyAction::Print));
        assert_eq!(map_key(key(KeyCode::Char('z'))), None);
    }
}
