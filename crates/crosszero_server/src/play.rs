//! Line-based terminal front end.

use crate::client::{GameClient, RetryPolicy};
use crate::wire::{EMPTY_CODE, GameDto, StatusDto};
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument, warn};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play at `(row, col)`.
    Move(usize, usize),
    /// Start over with a fresh game.
    New,
    /// Leave.
    Quit,
}

impl Command {
    /// Parses `"row col"`, `"new"` or `"quit"`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        match line {
            "q" | "quit" | "exit" => return Some(Command::Quit),
            "n" | "new" => return Some(Command::New),
            _ => {}
        }
        let mut parts = line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|s| !s.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        parts.next().is_none().then_some(Command::Move(row, col))
    }
}

/// Renders a game for the terminal.
pub fn render(game: &GameDto) -> String {
    let board = match game.game_map.to_board() {
        Ok(board) => board.to_string(),
        Err(e) => format!("<unreadable board: {}>", e),
    };
    let status = match game.status {
        StatusDto::Playing => "Your move (X). Enter `row col`, `new` or `quit`.",
        StatusDto::CrossWin => "You win!",
        StatusDto::ZeroWin => "The server wins.",
        StatusDto::Draw => "Draw.",
    };
    format!("{}\n\n{}", board, status)
}

/// Whether the cell can be clicked locally; filled cells and finished games
/// are ignored without a request.
fn is_playable(game: &GameDto, row: usize, col: usize) -> bool {
    game.status == StatusDto::Playing
        && game
            .game_map
            .map
            .get(row)
            .and_then(|r| r.get(col))
            .is_some_and(|c| *c == EMPTY_CODE)
}

/// Runs an interactive game against the server at `server_url`.
///
/// # Errors
///
/// Returns an error if no game can be started or stdin fails.
#[instrument]
pub async fn run_play(server_url: String, size: Option<usize>, retry: RetryPolicy) -> Result<()> {
    let client = GameClient::new(server_url, retry);
    let mut game = client.new_game(size).await?;
    println!("{}", render(&game));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            println!("Could not read `{}`; expected `row col`.", line.trim());
            continue;
        };
        debug!(?command, "Player input");

        match command {
            Command::Quit => break,
            Command::New => match client.new_game(size).await {
                Ok(fresh) => game = fresh,
                Err(e) => {
                    warn!(error = %e, "Could not start game");
                    println!("Error: {:#}", e);
                    continue;
                }
            },
            Command::Move(row, col) => {
                if !is_playable(&game, row, col) {
                    println!("That cell cannot be played.");
                    continue;
                }
                match client.submit_move(&game, row, col).await {
                    Ok(updated) => game = updated,
                    Err(e) => {
                        warn!(error = %e, "Move failed");
                        println!("Error: {:#}", e);
                        continue;
                    }
                }
            }
        }
        println!("\n{}", render(&game));
    }
    Ok(())
}
