//! Strategy that picks a random available cell.

use super::OpponentStrategy;
use crate::{Board, Mark};
use rand::seq::IndexedRandom;
use tracing::trace;

/// Returns a uniformly random empty cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomEmpty;

impl OpponentStrategy for RandomEmpty {
    fn pick(&self, board: &Board, _mark: Mark) -> Option<(usize, usize)> {
        let empty: Vec<_> = board.empty_cells().collect();
        let choice = empty.choose(&mut rand::rng()).copied();
        trace!(candidates = empty.len(), ?choice, "Random pick");
        choice
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cell;

    #[test]
    fn test_always_picks_empty_cell() {
        let mut board = Board::default();
        board.set(0, 0, Cell::Occupied(Mark::Cross)).unwrap();
        board.set(1, 1, Cell::Occupied(Mark::Zero)).unwrap();
        for _ in 0..50 {
            let (r, c) = RandomEmpty.pick(&board, Mark::Zero).unwrap();
            assert!(board.is_empty(r, c));
        }
    }
}
