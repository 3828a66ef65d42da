//! Pluggable opponent strategies.
//!
//! The game engine only asks a strategy for one empty cell; it validates and
//! applies the choice itself, so a strategy can never corrupt a game.

mod first_empty;
mod minimax;
mod random;

pub use first_empty::FirstEmpty;
pub use minimax::Minimax;
pub use random::RandomEmpty;

use crate::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Capability: pick one empty cell on a board that is still being played.
pub trait OpponentStrategy: Send + Sync + std::fmt::Debug {
    /// Returns `(row, col)` of an empty cell for `mark`, or `None` if the
    /// board has no empty cell.
    fn pick(&self, board: &Board, mark: Mark) -> Option<(usize, usize)>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Selectable opponent strategy.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StrategyKind {
    /// First empty cell in row-major order.
    FirstEmpty,
    /// Uniformly random empty cell.
    Random,
    /// Depth-limited minimax search.
    #[default]
    Minimax,
}

impl StrategyKind {
    /// Builds the strategy. `depth` only applies to [`StrategyKind::Minimax`].
    #[instrument]
    pub fn build(self, depth: u32) -> Box<dyn OpponentStrategy> {
        match self {
            StrategyKind::FirstEmpty => Box::new(FirstEmpty),
            StrategyKind::Random => Box::new(RandomEmpty),
            StrategyKind::Minimax => Box::new(Minimax::new(depth)),
        }
    }
}
