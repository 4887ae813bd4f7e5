//! Application error type with consistent `{"error": ...}` JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Every handler failure funnels through here; no delegate error escapes a
/// request's boundary unserialized.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unknown user")]
    UnknownUser,

    #[error("wrong password")]
    WrongPassword,

    #[error("missing username")]
    MissingUsername,

    #[error("handle taken")]
    HandleTaken,

    #[error("unauthorized")]
    Unauthorized,

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

/// A panicked or cancelled `spawn_blocking` task is an internal fault.
pub(crate) fn join_error(e: tokio::task::JoinError) -> ApiError {
    ApiError::Internal(anyhow::anyhow!("spawn_blocking join error: {}", e))
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UnknownUser | ApiError::WrongPassword | ApiError::Unauthorized => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::MissingUsername => StatusCode::BAD_REQUEST,
            ApiError::HandleTaken => StatusCode::CONFLICT,
            ApiError::Internal(err) => {
                // Logged here, never echoed to the client.
                tracing::error!(error = %err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
