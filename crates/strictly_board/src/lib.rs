//! Board engine for strictly_duel.
//!
//! Pure game logic with no I/O: a 3x3 grid of [`Square`]s addressed by
//! [`Move`] (cells 1-9 in row-major order), win and full-board rules, and
//! the per-session [`Statistics`] counters.
//!
//! # Example
//!
//! ```
//! use strictly_board::{Board, Move, Symbol};
//!
//! let mut board = Board::new();
//! board.apply_move(Move::TopLeft, Symbol::X).unwrap();
//! board.apply_move(Move::TopCenter, Symbol::X).unwrap();
//! board.apply_move(Move::TopRight, Symbol::X).unwrap();
//! assert!(board.is_winner(Symbol::X));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod position;
mod stats;
mod types;

pub mod rules;

pub use error::BoardError;
pub use position::{DisplayGrid, Move};
pub use stats::{Outcome, Statistics};
pub use types::{Board, Square, Symbol};
