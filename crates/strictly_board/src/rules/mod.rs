//! Game rules for the 3x3 board.
//!
//! Pure functions evaluating board state. Rules are kept apart from board
//! storage; [`Board`](crate::Board) delegates to them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, is_winner};
