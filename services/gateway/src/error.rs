//! Gateway error surface
//!
//! Every failure leaves the handler as an `AppError` and reaches the wire
//! as `{error, message}` JSON. Core `LeagueError`s keep their stable codes;
//! `NothingToUndo` is benign and deliberately travels as a 200 no-op.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::LeagueError;

/// Central error type for the gateway.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    League(#[from] LeagueError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<crate::catalog_loader::CatalogLoadError> for AppError {
    fn from(err: crate::catalog_loader::CatalogLoadError) -> Self {
        AppError::ServiceUnavailable(err.to_string())
    }
}

fn league_status(error: &LeagueError) -> StatusCode {
    match error {
        LeagueError::ValidationFailed(_) => StatusCode::CONFLICT,
        LeagueError::UnknownParticipant(_) | LeagueError::UnknownAction(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LeagueError::TeamNotFound(_) => StatusCode::NOT_FOUND,
        // Benign no-op outcome, not a failure banner.
        LeagueError::NothingToUndo => StatusCode::OK,
        LeagueError::PartialCommitInconsistency { .. } => StatusCode::CONFLICT,
        LeagueError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::League(err) => (league_status(err), err.code(), err.to_string()),
            AppError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                msg.clone(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": message
        }));

        (status, body).into_response()
    }
}
