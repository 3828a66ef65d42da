//! REST endpoints.
//!
//! | Method | Path         | Effect                                      |
//! |--------|--------------|---------------------------------------------|
//! | POST   | `/game`      | create a game (`?size=N`), 201              |
//! | POST   | `/game/{id}` | submit the human move, opponent replies     |
//! | GET    | `/game/{id}` | fetch a game                                |
//! | DELETE | `/game/{id}` | drop a game, 204                            |
//! | GET    | `/schema`    | JSON schemas of the wire types              |
//! | GET    | `/health`    | liveness and stored game count              |

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::store::{GameStore, InMemoryGameStore};
use crate::wire::{GameDto, MoveRequest, extract_move};
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use crosszero_engine::{BoardSize, Game, GameId, OpponentStrategy};
use serde::Deserialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn GameStore>,
    strategy: Arc<dyn OpponentStrategy>,
    default_size: usize,
    max_size: usize,
}

impl AppState {
    /// Creates handler state from its parts.
    pub fn new(
        store: Arc<dyn GameStore>,
        strategy: Arc<dyn OpponentStrategy>,
        default_size: usize,
        max_size: usize,
    ) -> Self {
        Self {
            store,
            strategy,
            default_size,
            max_size,
        }
    }

    /// Creates state with an in-memory store and the configured strategy.
    #[instrument(skip(config))]
    pub fn from_config(config: &ServerConfig) -> Self {
        let strategy: Arc<dyn OpponentStrategy> =
            Arc::from(config.strategy().build(*config.search_depth()));
        info!(strategy = strategy.name(), "Opponent strategy selected");
        Self::new(
            Arc::new(InMemoryGameStore::new()),
            strategy,
            *config.default_board_size(),
            *config.max_board_size(),
        )
    }
}

/// Builds the router with request logging.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/game", post(create_game))
        .route(
            "/game/{id}",
            post(play_move).get(get_game).delete(delete_game),
        )
        .route("/schema", get(schema))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .map_request(log_request)
                .map_response(log_response),
        )
        .with_state(state)
}

fn log_request(req: Request<Body>) -> Request<Body> {
    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
    req
}

fn log_response(res: Response) -> Response {
    debug!(status = %res.status(), "Response sent");
    res
}

/// Query parameters of `POST /game`.
#[derive(Debug, Deserialize)]
pub struct CreateParams {
    /// Requested side length.
    pub size: Option<usize>,
}

#[instrument(skip(state))]
async fn create_game(
    State(state): State<AppState>,
    Query(params): Query<CreateParams>,
) -> Result<(StatusCode, Json<GameDto>), ApiError> {
    let size = params.size.unwrap_or(state.default_size);
    if size > state.max_size {
        return Err(ApiError::SizeLimit {
            size,
            max: state.max_size,
        });
    }
    let game = Game::new(BoardSize::new(size)?);
    let dto = GameDto::from(&game);
    state.store.insert(game).await;

    info!(game_id = %dto.id, size, "Game created");
    Ok((StatusCode::CREATED, Json(dto)))
}

#[instrument(skip(state, req), fields(game_id = %id))]
async fn play_move(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<GameDto>, ApiError> {
    let shared = state.store.get(id).await.ok_or(ApiError::NotFound(id))?;
    // Held until the response is built so concurrent moves on this game queue up.
    let mut game = shared.lock().await;

    let proposed = req.game_map.to_board()?;
    let mv = extract_move(game.board(), &proposed)?;

    // Both moves are played on a copy; the stored game changes only if both succeed.
    let mut next = game.clone();
    next.apply_move(mv)?;
    let next = reply_off_runtime(next, Arc::clone(&state.strategy)).await?;

    *game = next;
    info!(status = ?game.status(), "Move processed");
    Ok(Json(GameDto::from(&*game)))
}

/// Runs the opponent's search on the blocking pool and returns the game with
/// its reply applied.
async fn reply_off_runtime(
    mut game: Game,
    strategy: Arc<dyn OpponentStrategy>,
) -> Result<Game, ApiError> {
    let name = strategy.name();
    let (game, reply) = tokio::task::spawn_blocking(move || {
        let reply = game.opponent_move(strategy.as_ref());
        (game, reply)
    })
    .await
    .map_err(|e| ApiError::Opponent(format!("{} search did not finish: {}", name, e)))?;

    match reply {
        Ok(Some(reply)) => debug!(%reply, strategy = name, "Opponent replied"),
        Ok(None) => debug!("No opponent reply"),
        Err(e) => {
            error!(error = %e, strategy = name, "Opponent proposed an illegal move");
            return Err(ApiError::Opponent(format!("{} proposed an illegal move: {}", name, e)));
        }
    }
    Ok(game)
}

#[instrument(skip(state), fields(game_id = %id))]
async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<Json<GameDto>, ApiError> {
    let shared = state.store.get(id).await.ok_or(ApiError::NotFound(id))?;
    let game = shared.lock().await;
    Ok(Json(GameDto::from(&*game)))
}

#[instrument(skip(state), fields(game_id = %id))]
async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<GameId>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(id).await {
        info!("Game removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn schema() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "GameDto": schemars::schema_for!(GameDto),
        "MoveRequest": schemars::schema_for!(MoveRequest),
    }))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "games": state.store.len().await,
    }))
}
