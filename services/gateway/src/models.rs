//! Request/response DTOs for the HTTP and WebSocket surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use types::ids::{ActionId, EventId, ParticipantId, TeamId};
use types::numeric::Cost;
use types::team::Team;

/// Core team fields every team-shaped response carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    pub id: TeamId,
    pub display_name: String,
    pub owner_display_name: String,
    pub budget_total: Cost,
    pub budget_committed: Cost,
    pub budget_remaining: Cost,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
}

impl TeamView {
    pub fn from_team(team: &Team, member_count: usize) -> Self {
        Self {
            id: team.id,
            display_name: team.display_name.clone(),
            owner_display_name: team.owner_display_name.clone(),
            budget_total: team.budget.total,
            budget_committed: team.budget.committed,
            budget_remaining: team.budget.remaining(),
            member_count,
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyTeamResponse {
    pub team: TeamView,
    /// True when this request lazily created the team.
    pub created: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenameTeamRequest {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitRosterRequest {
    pub participants: Vec<ParticipantId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRosterResponse {
    pub team: TeamView,
    pub added: Vec<ParticipantId>,
    pub draft_cost: Cost,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppendEventRequest {
    pub participant_id: ParticipantId,
    pub action_id: ActionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppendEventResponse {
    pub event_id: EventId,
    pub recorded_at: DateTime<Utc>,
    pub affected_teams: Vec<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UndoResponse {
    pub undone: bool,
    pub event_id: Option<EventId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub team_id: TeamId,
    pub recorded: Cost,
    pub computed: Cost,
    pub consistent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadCatalogResponse {
    pub participants: usize,
    pub actions: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionListQuery {
    /// Include inactive actions (admin listings).
    #[serde(default)]
    pub all: bool,
}

/// Client → server WebSocket command.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientCommand {
    pub action: String,
    #[serde(default)]
    pub topics: Vec<String>,
}

/// Server → client WebSocket message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Subscription change acknowledged; unknown topic strings come back
    /// in `rejected`.
    Ack {
        action: String,
        topics: Vec<String>,
        rejected: Vec<String>,
    },
    /// Something the client subscribed to changed; re-fetch.
    Invalidation { topics: Vec<String> },
    /// The client lagged behind the fan-out; treat everything it watches
    /// as stale and re-fetch.
    Resync { topics: Vec<String> },
    Pong,
}
