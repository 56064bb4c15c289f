//! Scoring ledger endpoints: append, undo, recent feed

use axum::{
    extract::{Query, State},
    Json,
};
use scoreboard::{event_feed, scoring_topics, EventLine, DEFAULT_FEED_LIMIT};
use types::errors::LeagueError;

use crate::error::AppError;
use crate::identity::{require_admin, CallerIdentity};
use crate::models::{AppendEventRequest, AppendEventResponse, FeedQuery, UndoResponse};
use crate::state::AppState;

/// `POST /v1/scoring/events` — append one event to the ledger. Admin only.
pub async fn append_event(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    Json(request): Json<AppendEventRequest>,
) -> Result<Json<AppendEventResponse>, AppError> {
    require_admin(&identity)?;
    let outcome = state
        .store
        .append_event(request.participant_id, request.action_id, &identity)?;
    state.publish(scoring_topics(&outcome.affected_teams));
    Ok(Json(AppendEventResponse {
        event_id: outcome.event.id,
        recorded_at: outcome.event.recorded_at,
        affected_teams: outcome.affected_teams,
    }))
}

/// `POST /v1/scoring/undo` — delete the caller's most recent event.
///
/// An empty ledger for this actor is a no-op success, not an error.
pub async fn undo_last(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
) -> Result<Json<UndoResponse>, AppError> {
    require_admin(&identity)?;
    match state.store.undo_last(&identity) {
        Ok(outcome) => {
            state.publish(scoring_topics(&outcome.affected_teams));
            Ok(Json(UndoResponse {
                undone: true,
                event_id: Some(outcome.event.id),
            }))
        }
        Err(LeagueError::NothingToUndo) => Ok(Json(UndoResponse {
            undone: false,
            event_id: None,
        })),
        Err(err) => Err(err.into()),
    }
}

/// `GET /v1/scoring/events?limit=` — newest-first slice of the ledger.
pub async fn recent_events(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<EventLine>>, AppError> {
    let snapshot = state.store.snapshot()?;
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    Ok(Json(event_feed(&snapshot, limit)))
}
