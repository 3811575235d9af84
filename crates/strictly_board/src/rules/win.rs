//! Win detection.

use crate::{Board, Move, Square, Symbol};
use tracing::instrument;

/// The eight winning lines: rows, columns, diagonals.
pub const LINES: [[Move; 3]; 8] = [
    // Rows
    [Move::TopLeft, Move::TopCenter, Move::TopRight],
    [Move::MiddleLeft, Move::Center, Move::MiddleRight],
    [Move::BottomLeft, Move::BottomCenter, Move::BottomRight],
    // Columns
    [Move::TopLeft, Move::MiddleLeft, Move::BottomLeft],
    [Move::TopCenter, Move::Center, Move::BottomCenter],
    [Move::TopRight, Move::MiddleRight, Move::BottomRight],
    // Diagonals
    [Move::TopLeft, Move::Center, Move::BottomRight],
    [Move::TopRight, Move::Center, Move::BottomLeft],
];

/// Checks whether `symbol` occupies all three cells of any winning line.
///
/// Only the symbol that just moved needs checking; a move can never
/// complete a line for the opponent.
#[instrument(skip(board))]
pub fn is_winner(board: &Board, symbol: Symbol) -> bool {
    let mark = Square::Occupied(symbol);
    LINES
        .iter()
        .any(|line| line.iter().all(|mv| board.get(*mv) == mark))
}
