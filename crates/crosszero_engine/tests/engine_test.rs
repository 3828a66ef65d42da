//! Tests for the game-state machine.

use crosszero_engine::rules::evaluate_status;
use crosszero_engine::{
    Board, BoardSize, Cell, FirstEmpty, Game, GameStatus, Mark, Minimax, Move, MoveError,
    OPPONENT_MARK,
};
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn play(game: &mut Game, row: usize, col: usize, mark: Mark) {
    game.apply_move(Move::new(row, col, mark))
        .expect("Move should be accepted");
}

#[test]
fn test_new_game_is_empty_and_playing() {
    let game = Game::default();
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.board().size(), 3);
    assert_eq!(game.board().cells().len(), 9);
    assert!(game.board().cells().iter().all(|c| *c == Cell::Empty));
}

#[test]
fn test_new_games_have_distinct_ids() {
    assert_ne!(Game::default().id(), Game::default().id());
}

#[test]
fn test_custom_size() {
    let game = Game::new(BoardSize::new(5).unwrap());
    assert_eq!(game.board().cells().len(), 25);
}

#[test]
fn test_same_cell_twice_is_occupied() {
    let mut game = Game::default();
    play(&mut game, 0, 0, Mark::Cross);
    let err = game.apply_move(Move::new(0, 0, Mark::Zero)).unwrap_err();
    assert_eq!(
        err,
        MoveError::CellOccupied {
            row: 0,
            col: 0,
            by: Mark::Cross
        }
    );
    assert_eq!(game.board().get(0, 0), Some(Cell::Occupied(Mark::Cross)));
}

#[test]
fn test_row_out_of_bounds() {
    let mut game = Game::default();
    let err = game.apply_move(Move::new(3, 0, Mark::Cross)).unwrap_err();
    assert_eq!(
        err,
        MoveError::OutOfBounds {
            row: 3,
            col: 0,
            size: 3
        }
    );
    assert!(err.to_string().contains("outside"));
}

#[test]
fn test_col_out_of_bounds() {
    let mut game = Game::default();
    assert!(matches!(
        game.apply_move(Move::new(0, 7, Mark::Cross)),
        Err(MoveError::OutOfBounds { .. })
    ));
}

#[test]
fn test_top_row_cross_wins() {
    let mut game = Game::default();
    play(&mut game, 0, 0, Mark::Cross);
    play(&mut game, 1, 0, Mark::Zero);
    play(&mut game, 0, 1, Mark::Cross);
    play(&mut game, 1, 1, Mark::Zero);
    play(&mut game, 0, 2, Mark::Cross);
    assert_eq!(game.status(), GameStatus::CrossWins);
}

/// Plays X O X / O X X / O X O.
fn drawn_game() -> Game {
    let mut game = Game::default();
    for (r, c, m) in [
        (0, 0, Mark::Cross),
        (0, 1, Mark::Zero),
        (0, 2, Mark::Cross),
        (1, 0, Mark::Zero),
        (1, 1, Mark::Cross),
        (2, 0, Mark::Zero),
        (1, 2, Mark::Cross),
        (2, 2, Mark::Zero),
        (2, 1, Mark::Cross),
    ] {
        play(&mut game, r, c, m);
    }
    game
}

#[test]
fn test_full_board_without_line_is_draw() {
    assert_eq!(drawn_game().status(), GameStatus::Draw);
}

#[test]
fn test_move_after_draw_is_rejected() {
    let mut game = drawn_game();
    let before = game.clone();

    // Terminal status is reported ahead of the occupied cell and the bounds.
    assert_eq!(
        game.apply_move(Move::new(0, 0, Mark::Zero)).unwrap_err(),
        MoveError::GameAlreadyOver(GameStatus::Draw)
    );
    assert_eq!(
        game.apply_move(Move::new(5, 5, Mark::Cross)).unwrap_err(),
        MoveError::GameAlreadyOver(GameStatus::Draw)
    );
    assert_eq!(game.opponent_move(&FirstEmpty), Ok(None));
    assert_eq!(game, before);
}

#[test]
fn test_move_after_terminal_is_rejected() {
    let mut game = Game::new(BoardSize::new(1).unwrap());
    play(&mut game, 0, 0, Mark::Cross);
    assert_eq!(game.status(), GameStatus::CrossWins);

    let mut game = Game::default();
    play(&mut game, 0, 0, Mark::Cross);
    play(&mut game, 0, 1, Mark::Cross);
    play(&mut game, 0, 2, Mark::Cross);
    let before = game.clone();
    let err = game.apply_move(Move::new(2, 2, Mark::Zero)).unwrap_err();
    assert_eq!(err, MoveError::GameAlreadyOver(GameStatus::CrossWins));
    assert_eq!(game, before);
}

#[test]
fn test_terminal_check_precedes_bounds_check() {
    let mut game = Game::new(BoardSize::new(1).unwrap());
    play(&mut game, 0, 0, Mark::Zero);
    assert!(matches!(
        game.apply_move(Move::new(9, 9, Mark::Cross)),
        Err(MoveError::GameAlreadyOver(GameStatus::ZeroWins))
    ));
}

#[test]
fn test_opponent_moves_with_zero() {
    let mut game = Game::default();
    play(&mut game, 0, 0, Mark::Cross);
    let mv = game.opponent_move(&FirstEmpty).unwrap().unwrap();
    assert_eq!(mv, Move::new(0, 1, OPPONENT_MARK));
    assert_eq!(game.board().get(0, 1), Some(Cell::Occupied(Mark::Zero)));
}

#[test]
fn test_opponent_skips_finished_game() {
    let mut game = Game::new(BoardSize::new(1).unwrap());
    play(&mut game, 0, 0, Mark::Cross);
    assert_eq!(game.opponent_move(&Minimax::default()), Ok(None));
}

#[test]
fn test_minimax_never_loses_to_first_empty() {
    // Cross plays the first empty cell every turn, Zero searches.
    let mut game = Game::default();
    while game.status() == GameStatus::Playing {
        let (r, c) = game.board().empty_cells().next().unwrap();
        play(&mut game, r, c, Mark::Cross);
        game.opponent_move(&Minimax::default()).unwrap();
    }
    assert_ne!(game.status(), GameStatus::CrossWins);
}

#[test]
fn test_minimax_reply_on_five_by_five_is_bounded() {
    let mut game = Game::new(BoardSize::new(5).unwrap());
    play(&mut game, 2, 2, Mark::Cross);

    let started = Instant::now();
    let reply = game.opponent_move(&Minimax::default()).unwrap();
    let elapsed = started.elapsed();

    assert!(reply.is_some());
    assert!(elapsed < Duration::from_secs(10), "reply took {:?}", elapsed);
}

#[test]
fn test_from_parts_derives_status() {
    let mut board = Board::default();
    for c in 0..3 {
        board.set(2, c, Cell::Occupied(Mark::Zero)).unwrap();
    }
    let id = Game::default().id();
    let game = Game::from_parts(id, board);
    assert_eq!(game.id(), id);
    assert_eq!(game.status(), GameStatus::ZeroWins);
}

fn arb_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        Just(Cell::Occupied(Mark::Cross)),
        Just(Cell::Occupied(Mark::Zero)),
    ]
}

fn arb_mark() -> impl Strategy<Value = Mark> {
    prop_oneof![Just(Mark::Cross), Just(Mark::Zero)]
}

/// A permutation of the nine cell indices of a 3×3 board.
fn arb_order() -> impl Strategy<Value = Vec<usize>> {
    Just((0..9).collect::<Vec<usize>>()).prop_shuffle()
}

fn board_of(marks: &[Option<Mark>]) -> Board {
    let rows = marks
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|m| m.map_or(Cell::Empty, Cell::Occupied))
                .collect()
        })
        .collect();
    Board::from_rows(rows).unwrap()
}

fn replay(marks: &[Option<Mark>], order: &[usize]) -> Game {
    let mut game = Game::default();
    for &i in order {
        if let Some(mark) = marks[i] {
            play(&mut game, i / 3, i % 3, mark);
        }
    }
    game
}

fn arb_board() -> impl Strategy<Value = Board> {
    (1usize..=5).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(arb_cell(), n), n)
            .prop_map(|rows| Board::from_rows(rows).unwrap())
    })
}

proptest! {
    #[test]
    fn prop_evaluation_is_idempotent(board in arb_board()) {
        let first = evaluate_status(&board);
        prop_assert_eq!(first, evaluate_status(&board.clone()));
    }

    #[test]
    fn prop_status_independent_of_move_order(
        marks in prop::collection::vec(prop::option::of(arb_mark()), 9),
        first in arb_order(),
        second in arb_order(),
    ) {
        let target = board_of(&marks);
        // A won position could end the game before every cell is placed.
        prop_assume!(evaluate_status(&target).winner().is_none());

        let a = replay(&marks, &first);
        let b = replay(&marks, &second);
        prop_assert_eq!(a.board(), &target);
        prop_assert_eq!(a.board(), b.board());
        prop_assert_eq!(a.status(), b.status());
        prop_assert_eq!(a.status(), evaluate_status(&target));
    }

    #[test]
    fn prop_accepted_move_fills_exactly_one_cell(board in arb_board(), r in 0usize..5, c in 0usize..5) {
        let mut game = Game::from_parts(Game::default().id(), board);
        let before = game.board().clone();
        let filled = |b: &Board| b.cells().iter().filter(|c| **c != Cell::Empty).count();
        match game.apply_move(Move::new(r, c, Mark::Cross)) {
            Ok(_) => prop_assert_eq!(filled(game.board()), filled(&before) + 1),
            Err(_) => prop_assert_eq!(game.board(), &before),
        }
        prop_assert_eq!(game.status(), evaluate_status(game.board()));
    }
}
