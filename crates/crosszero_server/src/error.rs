//! API error type and its HTTP mapping.

use crate::wire::WireError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crosszero_engine::{GameId, MoveError, SizeError};
use derive_more::{Display, Error, From};
use serde::Serialize;
use tracing::warn;

/// Error returned by request handlers.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// No game with this id.
    #[display("Game {} not found", _0)]
    #[from(ignore)]
    NotFound(#[error(not(source))] GameId),

    /// Payload could not be parsed or describes an illegal change.
    #[display("{}", _0)]
    Wire(WireError),

    /// The engine rejected the move.
    #[display("{}", _0)]
    Move(MoveError),

    /// Requested board size is not allowed.
    #[display("{}", _0)]
    Size(SizeError),

    /// The opponent strategy failed to produce a legal reply.
    #[display("Opponent failed: {}", _0)]
    #[from(ignore)]
    Opponent(#[error(not(source))] String),

    /// Requested board size is valid but above the configured limit.
    #[display("Board size {} exceeds the server limit of {}", size, max)]
    #[from(ignore)]
    SizeLimit {
        /// Requested size.
        size: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Opponent(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Wire(_)
            | ApiError::Move(_)
            | ApiError::Size(_)
            | ApiError::SizeLimit { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

/// JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "Request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
