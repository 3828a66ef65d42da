//! Win detection logic.

use super::lines::{Line, lines};
use crate::{Board, Cell, Mark};
use tracing::instrument;

/// Checks if there is a winner on the board.
///
/// Returns `Some(mark)` if some line is entirely that mark, `None`
/// otherwise. Rows are scanned first, then columns, then diagonals.
#[instrument(level = "trace", skip(board), fields(size = board.size()))]
pub fn check_winner(board: &Board) -> Option<Mark> {
    winner_on_lines(board, &lines(board.size()))
}

/// [`check_winner`] over a line table built once by the caller.
pub fn winner_on_lines(board: &Board, lines: &[Line]) -> Option<Mark> {
    lines.iter().find_map(|line| line_owner(board, line))
}

/// The mark that fills every cell of `line`, if any.
fn line_owner(board: &Board, line: &[(usize, usize)]) -> Option<Mark> {
    let (first, rest) = line.split_first()?;
    let mark = board.get(first.0, first.1)?.mark()?;
    rest.iter()
        .all(|&(r, c)| board.get(r, c) == Some(Cell::Occupied(mark)))
        .then_some(mark)
}
