use crate::handlers::{catalog, leaderboard, roster, scoring, team, ws};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/me/team",
            get(team::get_my_team).patch(team::rename_my_team),
        )
        .route("/teams/:id", get(team::get_team))
        .route("/teams/:id/roster/commit", post(roster::commit_roster))
        .route("/teams/:id/reconcile", get(team::reconcile_team))
        .route(
            "/scoring/events",
            post(scoring::append_event).get(scoring::recent_events),
        )
        .route("/scoring/undo", post(scoring::undo_last))
        .route("/leaderboard", get(leaderboard::get_leaderboard))
        .route("/catalog/participants", get(catalog::list_participants))
        .route("/catalog/actions", get(catalog::list_actions))
        .route("/admin/catalog/reload", post(catalog::reload_catalog))
        .route("/ws", get(ws::ws_handler));

    Router::new()
        .nest("/v1", api_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
