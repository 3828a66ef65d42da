//! Strategy that picks the first available cell.

use super::OpponentStrategy;
use crate::{Board, Mark};

/// Returns the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmpty;

impl OpponentStrategy for FirstEmpty {
    fn pick(&self, board: &Board, _mark: Mark) -> Option<(usize, usize)> {
        board.empty_cells().next()
    }

    fn name(&self) -> &'static str {
        "first_empty"
    }
}
