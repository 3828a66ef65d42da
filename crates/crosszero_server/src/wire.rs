//! JSON wire schema.
//!
//! These types are the only shapes accepted from or sent to clients. They
//! are parsed into engine types at the boundary and never passed further in.

use crosszero_engine::{Board, BoardError, Cell, Game, GameStatus, Mark, Move, PLAYER_MARK};
use derive_more::{Display, Error, From};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Wire code for an empty cell.
pub const EMPTY_CODE: u8 = 0;
/// Wire code for a cross.
pub const CROSS_CODE: u8 = 1;
/// Wire code for a zero.
pub const ZERO_CODE: u8 = 2;

/// Game status as sent over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusDto {
    /// Moves are accepted.
    Playing,
    /// Cross completed a line.
    CrossWin,
    /// Zero completed a line.
    ZeroWin,
    /// Full board, no line.
    Draw,
}

impl From<GameStatus> for StatusDto {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Playing => StatusDto::Playing,
            GameStatus::CrossWins => StatusDto::CrossWin,
            GameStatus::ZeroWins => StatusDto::ZeroWin,
            GameStatus::Draw => StatusDto::Draw,
        }
    }
}

/// Board as nested rows of cell codes (0 empty, 1 cross, 2 zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BoardDto {
    /// Rows of cell codes.
    pub map: Vec<Vec<u8>>,
    /// Side length; must equal the number of rows.
    pub size: usize,
}

/// A game as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameDto {
    /// Game identifier.
    pub id: Uuid,
    /// Current board.
    pub game_map: BoardDto,
    /// Current status.
    pub status: StatusDto,
}

/// Body of `POST /game/{id}`: the board the client wants to reach.
///
/// `id` and `status` may be echoed back by clients but are ignored; the path
/// id and the recomputed status are authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Echoed game id.
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Proposed board with exactly one new cross.
    pub game_map: BoardDto,
    /// Echoed status.
    #[serde(default)]
    pub status: Option<StatusDto>,
}

/// Rejected wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum WireError {
    /// Unknown cell code.
    #[display("Unknown cell code {} at ({}, {})", code, row, col)]
    #[from(ignore)]
    UnknownCell {
        /// Offending code.
        code: u8,
        /// Row of the code.
        row: usize,
        /// Column of the code.
        col: usize,
    },
    /// Declared size disagrees with the rows sent.
    #[display("Declared size {} but {} rows were sent", declared, rows)]
    #[from(ignore)]
    SizeMismatch {
        /// `size` field.
        declared: usize,
        /// Number of rows in `map`.
        rows: usize,
    },
    /// The rows do not form a valid board.
    #[display("{}", _0)]
    Board(BoardError),
    /// Proposed board is not reachable from the stored one by one cross.
    #[display("Invalid move: {}", _0)]
    #[from(ignore)]
    IllegalChange(#[error(not(source))] String),
}

impl BoardDto {
    /// Parses into an engine board.
    ///
    /// # Errors
    ///
    /// Returns [`WireError`] for unknown cell codes, ragged rows or a size
    /// field that disagrees with the rows.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn to_board(&self) -> Result<Board, WireError> {
        if self.size != self.map.len() {
            return Err(WireError::SizeMismatch {
                declared: self.size,
                rows: self.map.len(),
            });
        }
        let rows = self
            .map
            .iter()
            .enumerate()
            .map(|(row, codes)| {
                codes
                    .iter()
                    .enumerate()
                    .map(|(col, &code)| cell_from_code(code, row, col))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Board::from_rows(rows)?)
    }
}

impl From<&Board> for BoardDto {
    fn from(board: &Board) -> Self {
        Self {
            map: board
                .rows()
                .map(|row| row.iter().map(|c| code_from_cell(*c)).collect())
                .collect(),
            size: board.size(),
        }
    }
}

impl From<&Game> for GameDto {
    fn from(game: &Game) -> Self {
        Self {
            id: game.id(),
            game_map: BoardDto::from(game.board()),
            status: game.status().into(),
        }
    }
}

fn cell_from_code(code: u8, row: usize, col: usize) -> Result<Cell, WireError> {
    match code {
        EMPTY_CODE => Ok(Cell::Empty),
        CROSS_CODE => Ok(Cell::Occupied(Mark::Cross)),
        ZERO_CODE => Ok(Cell::Occupied(Mark::Zero)),
        code => Err(WireError::UnknownCell { code, row, col }),
    }
}

fn code_from_cell(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => EMPTY_CODE,
        Cell::Occupied(Mark::Cross) => CROSS_CODE,
        Cell::Occupied(Mark::Zero) => ZERO_CODE,
    }
}

/// Finds the single move that turns `stored` into `proposed`.
///
/// Cells already filled on `stored` must be unchanged, and exactly one empty
/// cell must have gained a cross.
///
/// # Errors
///
/// Returns [`WireError::IllegalChange`] for any other difference.
#[instrument(skip_all, fields(size = stored.size()))]
pub fn extract_move(stored: &Board, proposed: &Board) -> Result<Move, WireError> {
    if stored.size() != proposed.size() {
        warn!(proposed = proposed.size(), "Board size changed");
        return Err(WireError::IllegalChange(format!(
            "board size changed from {} to {}",
            stored.size(),
            proposed.size()
        )));
    }

    let size = stored.size();
    let mut placed: Option<Move> = None;
    for (i, (before, after)) in stored.cells().iter().zip(proposed.cells()).enumerate() {
        let (row, col) = (i / size, i % size);
        match (before, after) {
            (a, b) if a == b => {}
            (Cell::Occupied(_), _) => {
                warn!(row, col, "Filled cell was modified");
                return Err(WireError::IllegalChange(format!(
                    "cell ({}, {}) was already played",
                    row, col
                )));
            }
            (Cell::Empty, Cell::Occupied(mark)) if *mark != PLAYER_MARK => {
                warn!(row, col, %mark, "Client placed opponent mark");
                return Err(WireError::IllegalChange(format!(
                    "cell ({}, {}) must be {}, got {}",
                    row, col, PLAYER_MARK, mark
                )));
            }
            (Cell::Empty, Cell::Occupied(mark)) => {
                if placed.is_some() {
                    warn!(row, col, "More than one new mark");
                    return Err(WireError::IllegalChange(
                        "more than one new mark".to_string(),
                    ));
                }
                placed = Some(Move::new(row, col, *mark));
            }
            (Cell::Empty, Cell::Empty) => {}
        }
    }

    let mv = placed.ok_or_else(|| WireError::IllegalChange("no new mark".to_string()))?;
    debug!(%mv, "Extracted move");
    Ok(mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(map: Vec<Vec<u8>>) -> BoardDto {
        BoardDto {
            size: map.len(),
            map,
        }
    }

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&StatusDto::from(GameStatus::CrossWins)).unwrap();
        assert_eq!(json, "\"CROSS_WIN\"");
        let json = serde_json::to_string(&StatusDto::from(GameStatus::Playing)).unwrap();
        assert_eq!(json, "\"PLAYING\"");
    }

    #[test]
    fn test_game_dto_shape() {
        let game = Game::default();
        let value = serde_json::to_value(GameDto::from(&game)).unwrap();
        assert_eq!(value["gameMap"]["size"], 3);
        assert_eq!(value["gameMap"]["map"][2][2], 0);
        assert_eq!(value["status"], "PLAYING");
        assert_eq!(value["id"], game.id().to_string());
    }

    #[test]
    fn test_move_request_accepts_partial_payload() {
        let req: MoveRequest =
            serde_json::from_str(r#"{"gameMap":{"map":[[1]],"size":1}}"#).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.status, None);
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(
            dto(vec![vec![0, 3], vec![0, 0]]).to_board(),
            Err(WireError::UnknownCell {
                code: 3,
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let board = BoardDto {
            map: vec![vec![0; 3]; 3],
            size: 4,
        };
        assert!(matches!(
            board.to_board(),
            Err(WireError::SizeMismatch { declared: 4, rows: 3 })
        ));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(matches!(
            dto(vec![vec![0, 0], vec![0]]).to_board(),
            Err(WireError::Board(_))
        ));
    }

    #[test]
    fn test_extract_single_cross() {
        let stored = dto(vec![vec![1, 2, 0], vec![0; 3], vec![0; 3]]).to_board().unwrap();
        let proposed = dto(vec![vec![1, 2, 0], vec![0, 1, 0], vec![0; 3]]).to_board().unwrap();
        assert_eq!(
            extract_move(&stored, &proposed),
            Ok(Move::new(1, 1, Mark::Cross))
        );
    }

    #[test]
    fn test_extract_rejects_overwrite() {
        let stored = dto(vec![vec![1, 2, 0], vec![0; 3], vec![0; 3]]).to_board().unwrap();
        let proposed = dto(vec![vec![1, 1, 0], vec![0; 3], vec![0; 3]]).to_board().unwrap();
        assert!(extract_move(&stored, &proposed).is_err());
    }

    #[test]
    fn test_extract_rejects_zero_placement() {
        let stored = dto(vec![vec![0; 3]; 3]).to_board().unwrap();
        let proposed = dto(vec![vec![2, 0, 0], vec![0; 3], vec![0; 3]]).to_board().unwrap();
        assert!(extract_move(&stored, &proposed).is_err());
    }

    #[test]
    fn test_extract_rejects_two_crosses() {
        let stored = dto(vec![vec![0; 3]; 3]).to_board().unwrap();
        let proposed = dto(vec![vec![1, 1, 0], vec![0; 3], vec![0; 3]]).to_board().unwrap();
        assert!(extract_move(&stored, &proposed).is_err());
    }

    #[test]
    fn test_extract_rejects_unchanged() {
        let stored = dto(vec![vec![0; 3]; 3]).to_board().unwrap();
        assert_eq!(
            extract_move(&stored, &stored.clone()),
            Err(WireError::IllegalChange("no new mark".to_string()))
        );
    }
}
