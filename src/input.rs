/// Keyboard adapter: turns raw key codes and terminal key events into
/// player directions.  Anything unmapped is ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::Direction;

impl Direction {
    /// Browser-style key codes for the arrow keys (37..=40).
    pub fn from_key_code(code: u16) -> Option<Direction> {
        match code {
            37 => Some(Direction::Left),
            38 => Some(Direction::Up),
            39 => Some(Direction::Right),
            40 => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Arrow keys and WASD.
pub fn direction_for(key: &KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        _ => None,
    }
}

/// Q, Esc or Ctrl-C.
pub fn is_quit(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Moves fire on key release when the terminal reports releases, so one
/// keystroke is one step.  Terminals without release events only send
/// presses, so those count instead.
pub fn move_for(key: &KeyEvent, release_events: bool) -> Option<Direction> {
    let fires = if release_events {
        key.kind == KeyEventKind::Release
    } else {
        key.kind == KeyEventKind::Press
    };
    if fires {
        direction_for(key)
    } else {
        None
    }
}
