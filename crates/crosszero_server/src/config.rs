//! Server configuration loaded from TOML.

use crosszero_engine::{BoardSize, Minimax, StrategyKind};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    port: u16,

    /// Board size used when `POST /game` carries no `size`.
    #[serde(default = "default_board_size")]
    default_board_size: usize,

    /// Largest board size a client may request.
    #[serde(default = "default_max_board_size")]
    max_board_size: usize,

    /// Opponent strategy.
    #[serde(default)]
    strategy: StrategyKind,

    /// Search depth for the minimax strategy.
    #[serde(default = "default_search_depth")]
    search_depth: u32,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_board_size() -> usize {
    BoardSize::CLASSIC.get()
}

// Minimax cost grows with the number of empty cells to the power of the depth.
fn default_max_board_size() -> usize {
    5
}

fn default_search_depth() -> u32 {
    Minimax::DEFAULT_DEPTH
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_board_size: default_board_size(),
            max_board_size: default_max_board_size(),
            strategy: StrategyKind::default(),
            search_depth: default_search_depth(),
        }
    }
}

/// Values from the command line that take precedence over the file.
#[derive(Debug, Clone, Default, derive_new::new)]
pub struct ConfigOverrides {
    host: Option<String>,
    port: Option<u16>,
    strategy: Option<StrategyKind>,
    search_depth: Option<u32>,
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or fails
    /// validation.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(port = config.port, strategy = %config.strategy, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_file`].
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides and re-validates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the result is invalid.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(depth) = overrides.search_depth {
            self.search_depth = depth;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks that the board size settings are consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `max_board_size` is unsupported or
    /// `default_board_size` is outside `1..=max_board_size`.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        BoardSize::new(self.max_board_size)
            .map_err(|e| ConfigError::new(format!("max_board_size: {}", e)))?;
        if self.default_board_size == 0 || self.default_board_size > self.max_board_size {
            return Err(ConfigError::new(format!(
                "default_board_size {} must be within 1..={}",
                self.default_board_size, self.max_board_size
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
