//! Core domain types for the board.

use crate::{BoardError, Move, rules};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Marker placed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Symbol {
    /// Placed by the host, who moves first.
    X,
    /// Placed by the guest.
    O,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

/// Contents of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Nothing played here yet.
    Empty,
    /// Holds a symbol.
    Occupied(Symbol),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order.
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
        debug!("Board reset");
    }

    /// Gets the square addressed by `mv`.
    pub fn get(&self, mv: Move) -> Square {
        self.squares[mv.slot()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, mv: Move) -> bool {
        self.get(mv) == Square::Empty
    }

    /// Writes `symbol` into the cell addressed by `mv`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OccupiedCell`] if the cell already holds a
    /// symbol; the board is left unchanged.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, mv: Move, symbol: Symbol) -> Result<(), BoardError> {
        if !self.is_empty(mv) {
            return Err(BoardError::OccupiedCell(mv));
        }
        self.squares[mv.slot()] = Square::Occupied(symbol);
        Ok(())
    }

    /// True iff `symbol` fills one of the eight winning lines.
    pub fn is_winner(&self, symbol: Symbol) -> bool {
        rules::is_winner(self, symbol)
    }

    /// True iff no cell is empty.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Cells still open for play, in cell order.
    pub fn open_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|mv| self.is_empty(*mv))
            .collect()
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(symbol) => symbol.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_move_rejects_occupied() {
        let mut board = Board::new();
        board.apply_move(Move::Center, Symbol::X).unwrap();
        assert_eq!(
            board.apply_move(Move::Center, Symbol::O),
            Err(BoardError::OccupiedCell(Move::Center))
        );
        assert_eq!(board.get(Move::Center), Square::Occupied(Symbol::X));
    }

    #[test]
    fn test_reset_clears_board() {
        let mut board = Board::new();
        board.apply_move(Move::TopLeft, Symbol::X).unwrap();
        board.apply_move(Move::BottomRight, Symbol::O).unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.open_moves().len(), 9);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.apply_move(Move::TopLeft, Symbol::X).unwrap();
        board.apply_move(Move::Center, Symbol::O).unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
