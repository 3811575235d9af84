//! Board engine errors.

use crate::Move;

/// Error raised when a move cannot be applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BoardError {
    /// The addressed cell already holds a symbol.
    #[display("Cell {} is already occupied", _0.index())]
    OccupiedCell(Move),
}

impl std::error::Error for BoardError {}
