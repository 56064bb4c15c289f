//! Team endpoints: lazy self-team access, rename, detail, reconciliation

use axum::{
    extract::{Path, State},
    Json,
};
use scoreboard::{roster_topics, team_detail, TeamDetail};
use types::ids::TeamId;
use uuid::Uuid;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::models::{MyTeamResponse, ReconcileResponse, RenameTeamRequest, TeamView};
use crate::state::AppState;

fn member_count(state: &AppState, team_id: TeamId) -> Result<usize, AppError> {
    Ok(state.store.snapshot()?.members_of(team_id).count())
}

/// `GET /v1/me/team` — the caller's team, created on first access.
pub async fn get_my_team(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
) -> Result<Json<MyTeamResponse>, AppError> {
    let (team, created) = state.store.ensure_team(&identity)?;
    if created {
        state.publish(roster_topics(team.id));
    }
    let members = member_count(&state, team.id)?;
    Ok(Json(MyTeamResponse {
        team: TeamView::from_team(&team, members),
        created,
    }))
}

/// `PATCH /v1/me/team` — rename the caller's team.
pub async fn rename_my_team(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
    Json(request): Json<RenameTeamRequest>,
) -> Result<Json<MyTeamResponse>, AppError> {
    let team = state.store.rename_team(&identity, &request.display_name)?;
    state.publish(roster_topics(team.id));
    let members = member_count(&state, team.id)?;
    Ok(Json(MyTeamResponse {
        team: TeamView::from_team(&team, members),
        created: false,
    }))
}

/// `GET /v1/teams/{id}` — full detail read model for any team.
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamDetail>, AppError> {
    let team_id = TeamId::from_uuid(team_id);
    let snapshot = state.store.snapshot()?;
    let detail = team_detail(&snapshot, team_id)
        .ok_or(types::errors::LeagueError::TeamNotFound(team_id))?;
    Ok(Json(detail))
}

/// `GET /v1/teams/{id}/reconcile` — on-demand budget consistency report.
pub async fn reconcile_team(
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<ReconcileResponse>, AppError> {
    let report = state.store.reconcile_team(TeamId::from_uuid(team_id))?;
    Ok(Json(ReconcileResponse {
        team_id: report.team_id,
        recorded: report.recorded,
        computed: report.computed,
        consistent: report.is_consistent(),
    }))
}
