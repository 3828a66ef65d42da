//! Crosszero engine - pure tic-tac-toe game logic.
//!
//! The engine owns the board representation, move validation, win/draw
//! detection and the opponent strategies. It performs no I/O; the server
//! crate wraps it in an HTTP surface.
//!
//! # Example
//!
//! ```
//! use crosszero_engine::{FirstEmpty, Game, GameStatus, Mark, Move};
//!
//! let mut game = Game::default();
//! game.apply_move(Move::new(1, 1, Mark::Cross)).unwrap();
//! game.opponent_move(&FirstEmpty).unwrap();
//! assert_eq!(game.status(), GameStatus::Playing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod opponent;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use game::{Game, GameId, OPPONENT_MARK, PLAYER_MARK};
pub use opponent::{FirstEmpty, Minimax, OpponentStrategy, RandomEmpty, StrategyKind};
pub use types::{Board, BoardError, BoardSize, Cell, GameStatus, Mark, SizeError};
