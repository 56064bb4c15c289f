//! Catalog listing and admin reload endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use scoreboard::catalog_topics;
use types::action::ScoringAction;
use types::participant::Participant;

use crate::catalog_loader::load_catalog;
use crate::error::AppError;
use crate::identity::{require_admin, CallerIdentity};
use crate::models::{ActionListQuery, ReloadCatalogResponse};
use crate::state::AppState;

/// `GET /v1/catalog/participants` — source-ordered participant listing.
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Participant>>, AppError> {
    Ok(Json(state.store.participants_listing()?))
}

/// `GET /v1/catalog/actions` — active actions; `?all=true` includes
/// deactivated ones.
pub async fn list_actions(
    State(state): State<AppState>,
    Query(query): Query<ActionListQuery>,
) -> Result<Json<Vec<ScoringAction>>, AppError> {
    Ok(Json(state.store.actions_listing(query.all)?))
}

/// `POST /v1/admin/catalog/reload` — re-fetch the catalog from its
/// configured source and swap it in. Admin only.
pub async fn reload_catalog(
    State(state): State<AppState>,
    CallerIdentity(identity): CallerIdentity,
) -> Result<Json<ReloadCatalogResponse>, AppError> {
    require_admin(&identity)?;
    let snapshot = load_catalog(&state.http_client, &state.catalog_source).await?;
    let (participants, actions) = state.store.reload_catalog(snapshot)?;
    state.publish(catalog_topics());
    Ok(Json(ReloadCatalogResponse {
        participants,
        actions,
    }))
}
