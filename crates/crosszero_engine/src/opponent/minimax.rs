//! Depth-limited minimax opponent.

use super::OpponentStrategy;
use crate::rules::{Line, lines, status_on_lines};
use crate::{Board, Cell, GameStatus, Mark};
use tracing::{debug, instrument};

/// Score for an immediate win; shrinks with search depth so faster wins
/// are preferred.
const WIN_SCORE: i32 = 10;

/// Upper bound on the leaves of an unpruned search tree. The depth limit is
/// lowered until the tree for the current number of empty cells fits.
const LEAF_BUDGET: u64 = 500_000;

/// Minimax search that falls back to a line heuristic at `max_depth`.
///
/// Wins score `10 - depth`, losses `depth - 10` and draws `0`. Past the
/// depth limit each line holding only one side's marks contributes
/// `±10^(k-1)` for `k` marks. Among equally scored cells the first in
/// row-major order is chosen.
///
/// On large boards the depth is reduced so the tree stays within a fixed
/// leaf budget; a classic 3×3 game always searches the full `max_depth`.
#[derive(Debug, Clone, Copy)]
pub struct Minimax {
    max_depth: u32,
}

impl Minimax {
    /// Default search depth in plies after the candidate move.
    pub const DEFAULT_DEPTH: u32 = 4;

    /// Creates a search limited to `max_depth` plies.
    pub fn new(max_depth: u32) -> Self {
        Self { max_depth }
    }

    /// Depth limit used with `empty` empty cells.
    fn depth_for(&self, empty: usize) -> u32 {
        let mut depth = self.max_depth;
        while depth > 0 && leaf_count(empty, depth) > LEAF_BUDGET {
            depth -= 1;
        }
        depth
    }
}

impl Default for Minimax {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DEPTH)
    }
}

impl OpponentStrategy for Minimax {
    #[instrument(skip(self, board), fields(size = board.size(), max_depth = self.max_depth))]
    fn pick(&self, board: &Board, mark: Mark) -> Option<(usize, usize)> {
        let empty: Vec<_> = board.empty_cells().collect();
        let table = lines(board.size());
        let search = Search {
            lines: &table,
            limit: self.depth_for(empty.len()),
            me: mark,
        };

        let mut scratch = board.clone();
        let mut best: Option<((usize, usize), i32)> = None;
        for (r, c) in empty {
            scratch.place(r, c, Cell::Occupied(mark));
            let alpha = best.map_or(i32::MIN, |(_, top)| top);
            let score = search.score(&mut scratch, 0, alpha, i32::MAX, false);
            scratch.place(r, c, Cell::Empty);

            if best.is_none_or(|(_, top)| score > top) {
                best = Some(((r, c), score));
            }
        }

        debug!(?best, depth = search.limit, "Minimax selected cell");
        best.map(|(cell, _)| cell)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}

/// One search: the line table, the effective depth limit and the mark
/// being maximized.
struct Search<'a> {
    lines: &'a [Line],
    limit: u32,
    me: Mark,
}

impl Search<'_> {
    /// Alpha-beta minimax score of `board` with `depth` plies already played.
    ///
    /// Fail-soft: a result at or below `alpha` is only an upper bound, so the
    /// root keeps the first cell that scores strictly higher.
    fn score(
        &self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        let depth_score = i32::try_from(depth).unwrap_or(i32::MAX);
        match status_on_lines(board, self.lines) {
            GameStatus::Playing => {}
            GameStatus::Draw => return 0,
            status if status.winner() == Some(self.me) => return WIN_SCORE - depth_score,
            _ => return depth_score - WIN_SCORE,
        }

        if depth >= self.limit {
            return heuristic(board, self.lines, self.me);
        }

        let mover = if maximizing { self.me } else { self.me.opponent() };
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let empty: Vec<_> = board.empty_cells().collect();
        for (r, c) in empty {
            board.place(r, c, Cell::Occupied(mover));
            let score = self.score(board, depth + 1, alpha, beta, !maximizing);
            board.place(r, c, Cell::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Leaves of an unpruned tree: the candidate move plus `depth` replies.
fn leaf_count(empty: usize, depth: u32) -> u64 {
    (0..=depth as usize)
        .map(|i| empty.saturating_sub(i).max(1) as u64)
        .fold(1, u64::saturating_mul)
}

/// Static evaluation of an unfinished board from `me`'s point of view.
fn heuristic(board: &Board, lines: &[Line], me: Mark) -> i32 {
    lines
        .iter()
        .map(|line| {
            let (mine, theirs) = line.iter().fold((0u32, 0u32), |(m, t), &(r, c)| {
                match board.get(r, c).and_then(Cell::mark) {
                    Some(mark) if mark == me => (m + 1, t),
                    Some(_) => (m, t + 1),
                    None => (m, t),
                }
            });
            match (mine, theirs) {
                (0, 0) => 0,
                (m, 0) => 10i32.saturating_pow(m - 1),
                (0, t) => -10i32.saturating_pow(t - 1),
                _ => 0,
            }
        })
        .fold(0i32, i32::saturating_add)
}
