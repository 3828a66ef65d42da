//! The authoritative game-state machine.
//!
//! `Playing` is the only state that accepts moves. Every accepted move fills
//! exactly one empty cell and then re-derives the status from the board, so
//! `CrossWins`, `ZeroWins` and `Draw` are reached one-way and never left.

use crate::action::{Move, MoveError};
use crate::opponent::OpponentStrategy;
use crate::rules::evaluate_status;
use crate::types::{Board, BoardSize, Cell, GameStatus, Mark};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Opaque unique game identifier.
pub type GameId = Uuid;

/// Mark played by the human.
pub const PLAYER_MARK: Mark = Mark::Cross;

/// Mark played by the server-side opponent.
pub const OPPONENT_MARK: Mark = Mark::Zero;

/// A single game: identity, board and status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    id: GameId,
    board: Board,
    status: GameStatus,
}

impl Game {
    /// Creates a game with an empty board and a fresh id.
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        let game = Self {
            id: Uuid::new_v4(),
            board: Board::new(size),
            status: GameStatus::Playing,
        };
        info!(game_id = %game.id, size = size.get(), "Created game");
        game
    }

    /// Rebuilds a game from stored parts, deriving the status from the board.
    #[instrument(skip(board), fields(size = board.size()))]
    pub fn from_parts(id: GameId, board: Board) -> Self {
        let status = evaluate_status(&board);
        Self { id, board, status }
    }

    /// Game identifier.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Checks a move without applying it.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameAlreadyOver`] when the game is terminal,
    /// [`MoveError::OutOfBounds`] for coordinates off the board and
    /// [`MoveError::CellOccupied`] when the cell is taken, in that order.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn validate(&self, mv: &Move) -> Result<(), MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameAlreadyOver(self.status));
        }
        let size = self.board.size();
        match self.board.get(mv.row, mv.col) {
            None => Err(MoveError::OutOfBounds {
                row: mv.row,
                col: mv.col,
                size,
            }),
            Some(Cell::Occupied(by)) => Err(MoveError::CellOccupied {
                row: mv.row,
                col: mv.col,
                by,
            }),
            Some(Cell::Empty) => Ok(()),
        }
    }

    /// Places a mark and recomputes the status.
    ///
    /// A rejected move leaves the game unchanged.
    ///
    /// # Errors
    ///
    /// See [`Game::validate`].
    #[instrument(skip(self), fields(game_id = %self.id, mv = %mv))]
    pub fn apply_move(&mut self, mv: Move) -> Result<&Game, MoveError> {
        if let Err(e) = self.validate(&mv) {
            warn!(error = %e, "Rejected move");
            return Err(e);
        }

        let size = self.board.size();
        self.board
            .set(mv.row, mv.col, Cell::Occupied(mv.mark))
            .map_err(|_| MoveError::OutOfBounds {
                row: mv.row,
                col: mv.col,
                size,
            })?;
        self.status = evaluate_status(&self.board);

        info!(status = ?self.status, "Move applied");
        Ok(self)
    }

    /// Lets the opponent strategy play one [`OPPONENT_MARK`].
    ///
    /// Returns the move played, or `None` if the game is already over or the
    /// strategy found no cell.
    ///
    /// # Errors
    ///
    /// Propagates [`MoveError`] if the strategy proposes an illegal cell.
    #[instrument(skip(self, strategy), fields(game_id = %self.id))]
    pub fn opponent_move(
        &mut self,
        strategy: &dyn OpponentStrategy,
    ) -> Result<Option<Move>, MoveError> {
        if self.status.is_terminal() {
            debug!(status = ?self.status, "Skipping opponent move on finished game");
            return Ok(None);
        }
        let Some((row, col)) = strategy.pick(&self.board, OPPONENT_MARK) else {
            debug!("Strategy found no empty cell");
            return Ok(None);
        };
        let mv = Move::new(row, col, OPPONENT_MARK);
        self.apply_move(mv)?;
        Ok(Some(mv))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(BoardSize::default())
    }
}
