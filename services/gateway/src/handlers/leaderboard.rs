//! League-wide standings endpoint

use axum::{extract::State, Json};
use scoreboard::{leaderboard, LeaderboardRow};

use crate::error::AppError;
use crate::state::AppState;

/// `GET /v1/leaderboard` — ranked standings recomputed from current state.
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    let snapshot = state.store.snapshot()?;
    Ok(Json(leaderboard(&snapshot)))
}
