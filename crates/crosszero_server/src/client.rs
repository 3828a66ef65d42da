//! HTTP client for the game server.

use crate::wire::{BoardDto, CROSS_CODE, EMPTY_CODE, GameDto, MoveRequest};
use anyhow::{Context, Result, bail};
use derive_getters::Getters;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Fixed-delay retry bound for transient failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, derive_new::new)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    max_retries: u32,
    /// Pause between attempts.
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(1000))
    }
}

/// REST client that creates games and submits moves.
#[derive(Debug, Clone)]
pub struct GameClient {
    base_url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl GameClient {
    /// Creates a client for the server at `base_url`.
    #[instrument]
    pub fn new(base_url: impl Into<String> + std::fmt::Debug, retry: RetryPolicy) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            retry,
        }
    }

    /// Starts a new game, optionally with a custom board size.
    ///
    /// # Errors
    ///
    /// Fails once every retry has failed or the response is not a game.
    #[instrument(skip(self))]
    pub async fn new_game(&self, size: Option<usize>) -> Result<GameDto> {
        let url = match size {
            Some(size) => format!("{}/game?size={}", self.base_url, size),
            None => format!("{}/game", self.base_url),
        };
        let game: GameDto = self
            .send_with_retry(|| self.client.post(&url))
            .await?
            .json()
            .await
            .context("Invalid game data structure")?;
        info!(game_id = %game.id, "Game started");
        Ok(game)
    }

    /// Plays a cross at `(row, col)` and returns the game after the
    /// opponent's reply.
    ///
    /// # Errors
    ///
    /// Fails if the cell is not an empty cell of `game`, or once every retry
    /// has failed.
    #[instrument(skip(self, game), fields(game_id = %game.id))]
    pub async fn submit_move(&self, game: &GameDto, row: usize, col: usize) -> Result<GameDto> {
        let request = MoveRequest {
            id: Some(game.id),
            game_map: with_cross(&game.game_map, row, col)?,
            status: Some(game.status),
        };
        let url = format!("{}/game/{}", self.base_url, game.id);
        let updated: GameDto = self
            .send_with_retry(|| self.client.post(&url).json(&request))
            .await?
            .json()
            .await
            .context("Invalid game data structure")?;
        debug!(status = ?updated.status, "Move submitted");
        Ok(updated)
    }

    /// Sends a request, retrying connection errors and non-2xx responses.
    async fn send_with_retry<F>(&self, build: F) -> Result<reqwest::Response>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let mut attempt = 0;
        loop {
            let outcome = match build().send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    anyhow::anyhow!("Server error: {} {}", status, body)
                }
                Err(e) => anyhow::Error::new(e).context("Failed to connect to server"),
            };

            if attempt >= *self.retry.max_retries() {
                return Err(outcome);
            }
            attempt += 1;
            warn!(attempt, error = %outcome, "Request failed, retrying");
            tokio::time::sleep(*self.retry.delay()).await;
        }
    }
}

/// Copies `board` with a cross added at `(row, col)`.
fn with_cross(board: &BoardDto, row: usize, col: usize) -> Result<BoardDto> {
    let mut next = board.clone();
    let Some(cell) = next.map.get_mut(row).and_then(|r| r.get_mut(col)) else {
        bail!("Cell ({}, {}) is outside the board", row, col);
    };
    if *cell != EMPTY_CODE {
        bail!("Cell ({}, {}) is already taken", row, col);
    }
    *cell = CROSS_CODE;
    Ok(next)
}
