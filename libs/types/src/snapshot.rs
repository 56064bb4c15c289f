//! Consistent read view for aggregation
//!
//! Aggregation is a pure function: it takes one of these snapshots, cloned
//! under a single read lock, and derives scores, rankings, and feeds from
//! it. Nothing here is a source of truth.

use crate::action::ScoringAction;
use crate::ids::TeamId;
use crate::participant::Participant;
use crate::roster::RosterMembership;
use crate::scoring::ScoringEvent;
use crate::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the read side needs, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSnapshot {
    pub taken_at: DateTime<Utc>,
    pub teams: Vec<Team>,
    pub rosters: Vec<RosterMembership>,
    /// Ledger events in append order.
    pub events: Vec<ScoringEvent>,
    pub participants: Vec<Participant>,
    pub actions: Vec<ScoringAction>,
}

impl LeagueSnapshot {
    /// Participant ids currently on the given team's roster.
    pub fn members_of(&self, team_id: TeamId) -> impl Iterator<Item = &RosterMembership> {
        self.rosters.iter().filter(move |m| m.team_id == team_id)
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }
}
