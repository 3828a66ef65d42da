//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Player symbol occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Mark {
    /// Cross (the human player).
    #[display("X")]
    Cross,
    /// Zero (the server-side opponent).
    #[display("O")]
    Zero,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Cross => Mark::Zero,
            Mark::Zero => Mark::Cross,
        }
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Nobody has played here yet.
    #[default]
    Empty,
    /// Cell taken by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Error for a board dimension outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Board size {} is outside 1..={}", size, BoardSize::MAX)]
pub struct SizeError {
    /// The rejected size.
    pub size: usize,
}

/// Side length of a square board.
///
/// Only sizes in `1..=BoardSize::MAX` can be constructed, so a [`Board`]
/// never has zero lines to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSize(usize);

impl BoardSize {
    /// Largest supported side length.
    pub const MAX: usize = 10;

    /// Classic 3×3 board.
    pub const CLASSIC: BoardSize = BoardSize(3);

    /// Validates a side length.
    pub fn new(size: usize) -> Result<Self, SizeError> {
        if size == 0 || size > Self::MAX {
            return Err(SizeError { size });
        }
        Ok(Self(size))
    }

    /// Returns the side length.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Error produced when building or indexing a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum BoardError {
    /// Coordinates fall outside the grid.
    #[display("Cell ({}, {}) is outside a {}x{} board", row, col, size, size)]
    #[from(ignore)]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Board side length.
        size: usize,
    },
    /// A row does not have exactly `size` cells.
    #[display("Row {} has {} cells, expected {}", row, len, size)]
    #[from(ignore)]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of cells found.
        len: usize,
        /// Expected number of cells.
        size: usize,
    },
    /// The number of rows is not a supported board size.
    #[display("{}", _0)]
    InvalidSize(SizeError),
}

/// N×N tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: BoardSize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board of the given size.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size.get() * size.get()],
        }
    }

    /// Builds a board from rows of cells.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the row count is not a valid size or any row
    /// has a different length than the row count.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let size = BoardSize::new(rows.len())?;
        let mut cells = Vec::with_capacity(size.get() * size.get());
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != size.get() {
                return Err(BoardError::NotSquare {
                    row,
                    len: cols.len(),
                    size: size.get(),
                });
            }
            cells.extend(cols);
        }
        Ok(Self { size, cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        let size = self.size();
        (row < size && col < size).then_some(row * size + col)
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Checks whether `(row, col)` is on the board and empty.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Empty))
    }

    /// Overwrites the cell at `(row, col)`.
    ///
    /// This is a raw board edit; [`crate::Game::apply_move`] is the validated
    /// path that never clears a cell.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let size = self.size();
        let i = self
            .index(row, col)
            .ok_or(BoardError::OutOfBounds { row, col, size })?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Writes a cell on the search path, where coordinates always come from
    /// [`Board::empty_cells`].
    ///
    /// Panics on coordinates off the board.
    pub(crate) fn place(&mut self, row: usize, col: usize, cell: Cell) {
        let size = self.size();
        self.cells[row * size + col] = cell;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size())
    }

    /// Iterates over the coordinates of empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Empty)
            .map(move |(i, _)| (i / size, i % size))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(mark) => mark.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GameStatus {
    /// Game is ongoing.
    #[display("playing")]
    Playing,
    /// Cross completed a line.
    #[display("cross wins")]
    CrossWins,
    /// Zero completed a line.
    #[display("zero wins")]
    ZeroWins,
    /// Board is full with no line.
    #[display("draw")]
    Draw,
}

impl GameStatus {
    /// Winning status for the given mark.
    pub fn won_by(mark: Mark) -> Self {
        match mark {
            Mark::Cross => GameStatus::CrossWins,
            Mark::Zero => GameStatus::ZeroWins,
        }
    }

    /// Whether no further moves are accepted.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }

    /// The winning mark, if the game was won.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameStatus::CrossWins => Some(Mark::Cross),
            GameStatus::ZeroWins => Some(Mark::Zero),
            GameStatus::Playing | GameStatus::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_size_bounds() {
        assert!(BoardSize::new(0).is_err());
        assert!(BoardSize::new(1).is_ok());
        assert!(BoardSize::new(BoardSize::MAX).is_ok());
        assert_eq!(
            BoardSize::new(BoardSize::MAX + 1),
            Err(SizeError {
                size: BoardSize::MAX + 1
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![
            vec![Cell::Empty, Cell::Empty],
            vec![Cell::Empty],
        ];
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardError::NotSquare {
                row: 1,
                len: 1,
                size: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_empty() {
        assert!(matches!(
            Board::from_rows(Vec::new()),
            Err(BoardError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::default();
        assert!(board.set(3, 0, Cell::Occupied(Mark::Cross)).is_err());
        assert_eq!(board.get(0, 3), None);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new(BoardSize::new(2).unwrap());
        board.set(0, 0, Cell::Occupied(Mark::Cross)).unwrap();
        let empty: Vec<_> = board.empty_cells().collect();
        assert_eq!(empty, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_display() {
        let mut board = Board::default();
        board.set(0, 0, Cell::Occupied(Mark::Cross)).unwrap();
        board.set(1, 1, Cell::Occupied(Mark::Zero)).unwrap();
        assert_eq!(board.to_string(), "X . .\n. O .\n. . .");
    }
}
