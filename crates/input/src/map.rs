//! Key mapping from terminal events to game intents.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Intent;

/// A physical control, independent of whether it went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Hold,
    HardDrop,
    Pause,
    Restart,
    Quit,
}

impl Control {
    pub fn press(self) -> Intent {
        match self {
            Control::Left => Intent::MoveLeftDown,
            Control::Right => Intent::MoveRightDown,
            Control::SoftDrop => Intent::SoftDropDown,
            Control::RotateCw => Intent::RotateCw,
            Control::RotateCcw => Intent::RotateCcw,
            Control::Hold => Intent::HoldSwap,
            Control::HardDrop => Intent::HardDrop,
            Control::Pause => Intent::Pause,
            Control::Restart => Intent::Restart,
            Control::Quit => Intent::Quit,
        }
    }

    /// Key-up intent; one-shot controls have none
    pub fn release(self) -> Option<Intent> {
        match self {
            Control::Left => Some(Intent::MoveLeftUp),
            Control::Right => Some(Intent::MoveRightUp),
            Control::SoftDrop => Some(Intent::SoftDropUp),
            _ => None,
        }
    }
}

/// Which control a key belongs to.
pub fn control_for(key: KeyEvent) -> Option<Control> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Control::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Control::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Control::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Control::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'x' | 'X' | 'k' | 'K') => Some(Control::RotateCw),
        KeyCode::Char('z' | 'Z' | 'y' | 'Y') => Some(Control::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(Control::HardDrop),
        KeyCode::Char('c' | 'C') => Some(Control::Hold),
        KeyCode::Char('p' | 'P') => Some(Control::Pause),
        KeyCode::Char('r' | 'R') => Some(Control::Restart),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Control::Quit),

        _ => None,
    }
}

/// Map a key event to an intent.
///
/// Terminal auto-repeat (`KeyEventKind::Repeat`) is dropped; the engine runs
/// its own repeat timers.
pub fn map_key_event(key: KeyEvent) -> Option<Intent> {
    let control = control_for(key)?;
    match key.kind {
        KeyEventKind::Press => Some(control.press()),
        KeyEventKind::Release => control.release(),
        KeyEventKind::Repeat => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind_and_state(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        )
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Intent::MoveLeftDown)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(Intent::MoveRightDown)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('J'))),
            Some(Intent::SoftDropDown)
        );
    }

    #[test]
    fn test_release_keys() {
        assert_eq!(
            map_key_event(release(KeyCode::Left)),
            Some(Intent::MoveLeftUp)
        );
        assert_eq!(
            map_key_event(release(KeyCode::Char('l'))),
            Some(Intent::MoveRightUp)
        );
        assert_eq!(
            map_key_event(release(KeyCode::Down)),
            Some(Intent::SoftDropUp)
        );
        // One-shot controls have no release.
        assert_eq!(map_key_event(release(KeyCode::Char(' '))), None);
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Intent::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('x'))),
            Some(Intent::RotateCw)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('Z'))),
            Some(Intent::RotateCcw)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Intent::HardDrop)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(Intent::HoldSwap)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(Intent::Pause)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(Intent::Restart)
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('9'))), None);
    }

    #[test]
    fn test_auto_repeat_is_dropped() {
        let key = KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(map_key_event(key), None);
    }

    #[test]
    fn test_quit_keys() {
        let quit = Some(Intent::Quit);
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('q'))), quit);
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Esc)), quit);
        assert_eq!(
            map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            quit
        );
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Char('c'))), Some(Intent::HoldSwap));
        assert_eq!(map_key_event(release(KeyCode::Char('q'))), None);
    }
}
