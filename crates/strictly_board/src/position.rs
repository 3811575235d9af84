//! Cell addressing: the nine moves and their grid and display coordinates.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, numbered 1-9 in row-major reading order.
///
/// The decimal cell number is the canonical wire representation of a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Move {
    /// Top-left (cell 1)
    TopLeft,
    /// Top-center (cell 2)
    TopCenter,
    /// Top-right (cell 3)
    TopRight,
    /// Middle-left (cell 4)
    MiddleLeft,
    /// Center (cell 5)
    Center,
    /// Middle-right (cell 6)
    MiddleRight,
    /// Bottom-left (cell 7)
    BottomLeft,
    /// Bottom-center (cell 8)
    BottomCenter,
    /// Bottom-right (cell 9)
    BottomRight,
}

impl Move {
    /// All 9 moves in cell order.
    pub const ALL: [Move; 9] = [
        Move::TopLeft,
        Move::TopCenter,
        Move::TopRight,
        Move::MiddleLeft,
        Move::Center,
        Move::MiddleRight,
        Move::BottomLeft,
        Move::BottomCenter,
        Move::BottomRight,
    ];

    /// Cell number (1-9).
    pub fn index(self) -> u8 {
        self.slot() as u8 + 1
    }

    /// Creates a move from its cell number (1-9).
    #[instrument]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=9 => Some(Self::ALL[usize::from(index - 1)]),
            _ => None,
        }
    }

    /// Grid coordinates of this cell as `(row, col)`, both in `0..3`.
    pub fn cell(self) -> (usize, usize) {
        (self.slot() / 3, self.slot() % 3)
    }

    /// Creates a move from grid coordinates.
    pub fn from_cell(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Some(Self::ALL[row * 3 + col])
        } else {
            None
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Move::TopLeft => "Top-left",
            Move::TopCenter => "Top-center",
            Move::TopRight => "Top-right",
            Move::MiddleLeft => "Middle-left",
            Move::Center => "Center",
            Move::MiddleRight => "Middle-right",
            Move::BottomLeft => "Bottom-left",
            Move::BottomCenter => "Bottom-center",
            Move::BottomRight => "Bottom-right",
        }
    }

    /// Offset into row-major storage (0-8).
    pub(crate) fn slot(self) -> usize {
        match self {
            Move::TopLeft => 0,
            Move::TopCenter => 1,
            Move::TopRight => 2,
            Move::MiddleLeft => 3,
            Move::Center => 4,
            Move::MiddleRight => 5,
            Move::BottomLeft => 6,
            Move::BottomCenter => 7,
            Move::BottomRight => 8,
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.index(), self.label())
    }
}

/// Maps cells to the origin of their on-screen box.
///
/// A renderer picks the origin of the top-left cell and the distance
/// between neighbouring cells; [`DisplayGrid::CLASSIC`] is the 500x500
/// pixel window layout with 100 px cells starting at (115, 115).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGrid {
    origin_x: u16,
    origin_y: u16,
    step_x: u16,
    step_y: u16,
}

impl DisplayGrid {
    /// Pixel layout of the classic windowed board.
    pub const CLASSIC: DisplayGrid = DisplayGrid::new(115, 115, 100, 100);

    /// Creates a grid with the given top-left origin and cell pitch.
    pub const fn new(origin_x: u16, origin_y: u16, step_x: u16, step_y: u16) -> Self {
        Self {
            origin_x,
            origin_y,
            step_x,
            step_y,
        }
    }

    /// Display coordinate `(x, y)` of the cell addressed by `mv`.
    pub fn coordinate(&self, mv: Move) -> (u16, u16) {
        let (row, col) = mv.cell();
        (
            self.origin_x + self.step_x * col as u16,
            self.origin_y + self.step_y * row as u16,
        )
    }
}
