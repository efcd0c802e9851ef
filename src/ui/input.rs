//! Keyboard mapping for the terminal frontend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::entities::Direction;
use crate::game::Command;

/// Input action that can be triggered by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    Attack,
    Quit,
}

impl InputAction {
    /// The session command this action drives, if any
    pub fn command(self) -> Option<Command> {
        match self {
            InputAction::Move(dir) => Some(Command::Move(dir)),
            InputAction::Attack => Some(Command::Attack),
            InputAction::Quit => None,
        }
    }
}

/// Map a key press to an action. WASD also works on a Russian
/// layout (ЦФЫВ sit on the same physical keys).
pub fn action_for_key(key: KeyEvent) -> Option<InputAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputAction::Quit);
    }

    let action = match key.code {
        KeyCode::Up => InputAction::Move(Direction::Up),
        KeyCode::Down => InputAction::Move(Direction::Down),
        KeyCode::Left => InputAction::Move(Direction::Left),
        KeyCode::Right => InputAction::Move(Direction::Right),
        KeyCode::Char(' ') => InputAction::Attack,
        KeyCode::Esc => InputAction::Quit,
        KeyCode::Char(c) => match c.to_lowercase().next()? {
            'w' | 'ц' => InputAction::Move(Direction::Up),
            'a' | 'ф' => InputAction::Move(Direction::Left),
            's' | 'ы' => InputAction::Move(Direction::Down),
            'd' | 'в' => InputAction::Move(Direction::Right),
            'q' | 'й' => InputAction::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_wasd_and_arrows_agree() {
        let pairs = [
            ('w', KeyCode::Up),
            ('a', KeyCode::Left),
            ('s', KeyCode::Down),
            ('d', KeyCode::Right),
        ];
        for (letter, arrow) in pairs {
            assert_eq!(action_for_key(key(KeyCode::Char(letter))), action_for_key(key(arrow)));
        }
    }

    #[test]
    fn test_russian_layout() {
        assert_eq!(action_for_key(key(KeyCode::Char('ц'))), Some(InputAction::Move(Direction::Up)));
        assert_eq!(action_for_key(key(KeyCode::Char('ф'))), Some(InputAction::Move(Direction::Left)));
        assert_eq!(action_for_key(key(KeyCode::Char('Ы'))), Some(InputAction::Move(Direction::Down)));
        assert_eq!(action_for_key(key(KeyCode::Char('в'))), Some(InputAction::Move(Direction::Right)));
    }

    #[test]
    fn test_attack_and_quit() {
        assert_eq!(action_for_key(key(KeyCode::Char(' '))), Some(InputAction::Attack));
        assert_eq!(action_for_key(key(KeyCode::Char('q'))), Some(InputAction::Quit));
        assert_eq!(action_for_key(key(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
        assert_eq!(InputAction::Quit.command(), None);
        assert_eq!(InputAction::Attack.command(), Some(Command::Attack));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(action_for_key(key(KeyCode::Char('x'))), None);
        assert_eq!(action_for_key(key(KeyCode::Enter)), None);
    }
}
