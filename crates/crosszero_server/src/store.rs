//! Game storage with per-game locking.

use async_trait::async_trait;
use crosszero_engine::{Game, GameId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument};

/// A stored game behind its own lock.
///
/// Holding the guard for a whole read-modify-write sequence serializes
/// concurrent requests for the same id; other ids are unaffected.
pub type SharedGame = Arc<Mutex<Game>>;

/// Storage for games, keyed by id.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Stores a game and returns its shared handle.
    async fn insert(&self, game: Game) -> SharedGame;

    /// Looks up a game by id.
    async fn get(&self, id: GameId) -> Option<SharedGame>;

    /// Removes a game. Returns `true` if it existed.
    async fn remove(&self, id: GameId) -> bool;

    /// Number of stored games.
    async fn len(&self) -> usize;
}

/// Process-local store. The map lock is held only for lookups and inserts.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    games: RwLock<HashMap<GameId, SharedGame>>,
}

impl InMemoryGameStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory game store");
        Self::default()
    }
}

#[async_trait]
impl GameStore for InMemoryGameStore {
    #[instrument(skip(self, game), fields(game_id = %game.id()))]
    async fn insert(&self, game: Game) -> SharedGame {
        let id = game.id();
        let shared = Arc::new(Mutex::new(game));
        self.games.write().await.insert(id, Arc::clone(&shared));
        debug!("Game stored");
        shared
    }

    #[instrument(skip(self))]
    async fn get(&self, id: GameId) -> Option<SharedGame> {
        let found = self.games.read().await.get(&id).cloned();
        debug!(found = found.is_some(), "Game lookup");
        found
    }

    #[instrument(skip(self))]
    async fn remove(&self, id: GameId) -> bool {
        let removed = self.games.write().await.remove(&id).is_some();
        debug!(removed, "Game removal");
        removed
    }

    async fn len(&self) -> usize {
        self.games.read().await.len()
    }
}
