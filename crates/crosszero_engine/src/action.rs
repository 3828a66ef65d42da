//! First-class move types.
//!
//! A move is the player's intent: a mark placed at a cell. It can be
//! validated against a game before it changes anything.

use crate::{GameStatus, Mark};
use tracing::instrument;

/// A mark placed at `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// The mark being placed.
    pub mark: Mark,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(row: usize, col: usize, mark: Mark) -> Self {
        Self { row, col, mark }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> ({}, {})", self.mark, self.row, self.col)
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Row or column is outside `[0, size)`.
    #[display("Cell ({}, {}) is outside a {}x{} board", row, col, size, size)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell ({}, {}) is already occupied by {}", row, col, by)]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Mark already in the cell.
        by: Mark,
    },

    /// The game reached a terminal status.
    #[display("Game is already over ({})", _0)]
    GameAlreadyOver(#[error(not(source))] GameStatus),
}
