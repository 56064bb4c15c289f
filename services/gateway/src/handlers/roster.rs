//! Roster commit endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use scoreboard::roster_topics;
use types::draft::DraftSelection;
use types::ids::TeamId;
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::models::{CommitRosterRequest, CommitRosterResponse, TeamView};
use crate::state::AppState;

/// `POST /v1/teams/{id}/roster/commit` — the single roster mutation.
///
/// Only the owning user may commit to a team; the ownership check happens
/// against current store state, not anything the client sent.
pub async fn commit_roster(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    Path(team_id): Path<Uuid>,
    Json(request): Json<CommitRosterRequest>,
) -> Result<Json<CommitRosterResponse>, AppError> {
    let team_id = TeamId::from_uuid(team_id);
    let team = state.store.team(team_id)?;
    if team.owner != identity.user_id {
        return Err(AppError::Forbidden(
            "only the team owner may commit its roster".into(),
        ));
    }

    let selection = DraftSelection::with_participants(team_id, request.participants);
    let outcome = state.store.commit_roster(&selection, &identity)?;
    state.publish(roster_topics(team_id));

    Ok(Json(CommitRosterResponse {
        team: TeamView::from_team(&outcome.team, outcome.member_count),
        added: outcome.added,
        draft_cost: outcome.draft_cost,
    }))
}
