//! Crosszero server - REST surface for the tic-tac-toe engine.
//!
//! # Architecture
//!
//! - **Routes**: axum handlers for creating games and submitting moves
//! - **Store**: games keyed by id, each behind its own lock
//! - **Wire**: JSON schema parsed into engine types at the boundary
//! - **Client**: reqwest client and the line-based `play` front end
//!
//! # Example
//!
//! ```no_run
//! use crosszero_server::{AppState, ServerConfig, router};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServerConfig::default();
//! let app = router(AppState::from_config(&config));
//! let listener = tokio::net::TcpListener::bind(("127.0.0.1", 8080)).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod config;
mod error;
mod play;
mod routes;
mod store;
mod wire;

pub use client::{GameClient, RetryPolicy};
pub use config::{ConfigError, ConfigOverrides, ServerConfig};
pub use error::ApiError;
pub use play::{Command, render, run_play};
pub use routes::{AppState, CreateParams, router};
pub use store::{GameStore, InMemoryGameStore, SharedGame};
pub use wire::{
    BoardDto, CROSS_CODE, EMPTY_CODE, GameDto, MoveRequest, StatusDto, WireError, ZERO_CODE,
    extract_move,
};
