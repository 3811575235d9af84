//! Key interpretation for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strictly_board::Move;

/// Moves the cursor one cell in the arrow's direction, stopping at edges.
pub fn move_cursor(cursor: Move, key: KeyCode) -> Move {
    let (row, col) = cursor.cell();
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Move::from_cell(row, col).unwrap_or(cursor)
}

/// Cell addressed by a digit key.
pub fn digit_move(key: KeyCode) -> Option<Move> {
    match key {
        KeyCode::Char(c) => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .and_then(Move::from_index),
        _ => None,
    }
}

/// `y` or `n`, either case.
pub fn yes_no(key: KeyCode) -> Option<bool> {
    match key {
        KeyCode::Char('y' | 'Y') => Some(true),
        KeyCode::Char('n' | 'N') => Some(false),
        _ => None,
    }
}

/// Esc or Ctrl-C. Always aborts, even while typing.
pub fn is_abort(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// [`is_abort`], plus `q` where no text is being typed.
pub fn is_quit(key: &KeyEvent) -> bool {
    is_abort(key) || key.code == KeyCode::Char('q')
}
