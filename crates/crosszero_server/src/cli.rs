//! Command-line interface for crosszero.

use clap::{Parser, Subcommand};
use crosszero_engine::StrategyKind;

/// Crosszero - tic-tac-toe against a server-side opponent
#[derive(Parser, Debug)]
#[command(name = "crosszero")]
#[command(about = "Tic-tac-toe game server and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP game server
    Serve {
        /// Path to the TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "crosszero.toml")]
        config: std::path::PathBuf,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Opponent strategy (first_empty, random, minimax)
        #[arg(short, long)]
        strategy: Option<StrategyKind>,

        /// Minimax search depth
        #[arg(long)]
        depth: Option<u32>,
    },

    /// Play in the terminal against a running server
    Play {
        /// Game server URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server_url: String,

        /// Board side length (server default if omitted)
        #[arg(long)]
        size: Option<usize>,

        /// Retries for failed requests
        #[arg(long, default_value = "3")]
        retries: u32,

        /// Delay between retries in milliseconds
        #[arg(long, default_value = "1000")]
        retry_delay_ms: u64,
    },
}
