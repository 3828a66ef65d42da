//! Crosszero - unified CLI
//!
//! Runs the game server or the terminal client.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use crosszero_server::{AppState, ConfigOverrides, RetryPolicy, ServerConfig, router, run_play};
use std::time::Duration;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            host,
            port,
            strategy,
            depth,
        } => {
            init_tracing("info,crosszero_server=debug,crosszero_engine=info");
            let config = ServerConfig::load_or_default(&config)?
                .with_overrides(ConfigOverrides::new(host, port, strategy, depth))?;
            run_http_server(config).await
        }
        Command::Play {
            server_url,
            size,
            retries,
            retry_delay_ms,
        } => {
            init_tracing("warn");
            let retry = RetryPolicy::new(retries, Duration::from_millis(retry_delay_ms));
            run_play(server_url, size, retry).await
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Run the HTTP game server
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
async fn run_http_server(config: ServerConfig) -> Result<()> {
    info!("Starting crosszero server");

    let app = router(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, app).await?;
    Ok(())
}
