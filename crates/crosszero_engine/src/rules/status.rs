//! Status evaluation: combines win and draw detection.

use super::{Line, is_full, lines, winner_on_lines};
use crate::{Board, GameStatus};
use tracing::{instrument, trace};

/// Computes the status of a board from its cells alone.
///
/// A completed line wins; otherwise a full board is a draw; otherwise play
/// continues. The result is recomputed from scratch on every call.
#[instrument(level = "trace", skip(board), fields(size = board.size()))]
pub fn evaluate_status(board: &Board) -> GameStatus {
    let status = status_on_lines(board, &lines(board.size()));
    trace!(?status, "Evaluated board");
    status
}

/// [`evaluate_status`] over a line table built once by the caller.
///
/// Search code evaluates many positions of one size and reuses the table.
pub fn status_on_lines(board: &Board, lines: &[Line]) -> GameStatus {
    match winner_on_lines(board, lines) {
        Some(mark) => GameStatus::won_by(mark),
        None if is_full(board) => GameStatus::Draw,
        None => GameStatus::Playing,
    }
}
