//! Score aggregation and ranking
//!
//! `score(team) = Σ point_delta(action)` over every ledger event whose
//! participant is a current member of the team. Point deltas are resolved
//! by joining the action catalog at aggregation time, never from the event
//! itself, so re-pricing an action re-prices history. A participant on
//! several teams fans every event out to all of them; that is the scoring
//! rule, not an accident.
//!
//! Display joins are forgiving: an unresolvable participant or action
//! renders a placeholder (and counts zero points) instead of failing the
//! whole page. Mutating operations hard-error on the same ids.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::{ActionId, EventId, ParticipantId, TeamId};
use types::numeric::{Cost, Points};
use types::scoring::ScoringEvent;
use types::snapshot::LeagueSnapshot;

/// Default cap on the recent-event feed.
pub const DEFAULT_FEED_LIMIT: usize = 200;

const UNKNOWN_PARTICIPANT: &str = "(removed participant)";
const UNKNOWN_ACTION: &str = "(removed action)";

/// One ranked leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRow {
    pub rank: usize,
    pub team_id: TeamId,
    pub display_name: String,
    pub owner_display_name: String,
    pub score: Points,
    pub member_count: usize,
    /// Ledger events attributable to this team's current members.
    pub event_count: usize,
    pub last_event_at: Option<DateTime<Utc>>,
}

/// One committed roster line in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberLine {
    pub participant_id: ParticipantId,
    pub display_name: String,
    pub acquisition_cost: Cost,
}

/// One resolved ledger event for feeds and detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLine {
    pub event_id: EventId,
    pub participant_name: String,
    pub action_label: String,
    pub point_delta: Points,
    pub recorded_at: DateTime<Utc>,
}

/// Per-team detail: roster, budget, and event history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamDetail {
    pub team_id: TeamId,
    pub display_name: String,
    pub owner_display_name: String,
    /// Name-sorted committed members.
    pub members: Vec<MemberLine>,
    pub budget_total: Cost,
    pub budget_committed: Cost,
    pub budget_remaining: Cost,
    pub score: Points,
    /// Attributable events, newest first.
    pub events: Vec<EventLine>,
}

/// Fan-out multimap: participant → every team currently holding them.
fn membership_index(snapshot: &LeagueSnapshot) -> BTreeMap<ParticipantId, Vec<TeamId>> {
    let mut index: BTreeMap<ParticipantId, Vec<TeamId>> = BTreeMap::new();
    for membership in &snapshot.rosters {
        index
            .entry(membership.participant_id)
            .or_default()
            .push(membership.team_id);
    }
    index
}

fn delta_index(snapshot: &LeagueSnapshot) -> BTreeMap<ActionId, Points> {
    snapshot
        .actions
        .iter()
        .map(|a| (a.id, a.point_delta))
        .collect()
}

fn resolve_event(snapshot: &LeagueSnapshot, event: &ScoringEvent) -> EventLine {
    let participant_name = snapshot
        .participants
        .iter()
        .find(|p| p.id == event.participant_id)
        .map(|p| p.display_name.clone())
        .unwrap_or_else(|| UNKNOWN_PARTICIPANT.to_string());
    let (action_label, point_delta) = snapshot
        .actions
        .iter()
        .find(|a| a.id == event.action_id)
        .map(|a| (a.label.clone(), a.point_delta))
        .unwrap_or_else(|| (UNKNOWN_ACTION.to_string(), Points::ZERO));
    EventLine {
        event_id: event.id,
        participant_name,
        action_label,
        point_delta,
        recorded_at: event.recorded_at,
    }
}

/// Current score of one team. Pure and always recomputed.
pub fn team_score(snapshot: &LeagueSnapshot, team_id: TeamId) -> Points {
    let deltas = delta_index(snapshot);
    let members: Vec<ParticipantId> = snapshot
        .members_of(team_id)
        .map(|m| m.participant_id)
        .collect();
    snapshot
        .events
        .iter()
        .filter(|e| members.contains(&e.participant_id))
        .map(|e| deltas.get(&e.action_id).copied().unwrap_or(Points::ZERO))
        .sum()
}

/// Full ranked leaderboard over every team in the snapshot.
///
/// Order: score descending, attributable event count descending, display
/// name ascending, team id ascending. The last key makes equal names
/// deterministic; everything before it is the published ranking rule.
pub fn leaderboard(snapshot: &LeagueSnapshot) -> Vec<LeaderboardRow> {
    #[derive(Default)]
    struct Tally {
        score: Points,
        events: usize,
        last_event_at: Option<DateTime<Utc>>,
    }

    let deltas = delta_index(snapshot);
    let holders = membership_index(snapshot);

    let mut tallies: BTreeMap<TeamId, Tally> = BTreeMap::new();
    for event in &snapshot.events {
        let Some(teams) = holders.get(&event.participant_id) else {
            continue;
        };
        let delta = deltas.get(&event.action_id).copied().unwrap_or(Points::ZERO);
        for team_id in teams {
            let tally = tallies.entry(*team_id).or_default();
            tally.score += delta;
            tally.events += 1;
            tally.last_event_at = match tally.last_event_at {
                Some(prev) if prev >= event.recorded_at => Some(prev),
                _ => Some(event.recorded_at),
            };
        }
    }

    let mut rows: Vec<LeaderboardRow> = snapshot
        .teams
        .iter()
        .map(|team| {
            let tally = tallies.remove(&team.id).unwrap_or_default();
            LeaderboardRow {
                rank: 0,
                team_id: team.id,
                display_name: team.display_name.clone(),
                owner_display_name: team.owner_display_name.clone(),
                score: tally.score,
                member_count: snapshot.members_of(team.id).count(),
                event_count: tally.events,
                last_event_at: tally.last_event_at,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.event_count.cmp(&a.event_count))
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }

    debug!(teams = rows.len(), "leaderboard recomputed");
    rows
}

/// Detail view for one team, or `None` if the team is not in the snapshot.
pub fn team_detail(snapshot: &LeagueSnapshot, team_id: TeamId) -> Option<TeamDetail> {
    let team = snapshot.team(team_id)?;

    let member_ids: Vec<ParticipantId> = snapshot
        .members_of(team_id)
        .map(|m| m.participant_id)
        .collect();

    let mut members: Vec<MemberLine> = member_ids
        .iter()
        .map(|id| {
            snapshot
                .participants
                .iter()
                .find(|p| p.id == *id)
                .map(|p| MemberLine {
                    participant_id: p.id,
                    display_name: p.display_name.clone(),
                    acquisition_cost: p.acquisition_cost,
                })
                .unwrap_or(MemberLine {
                    participant_id: *id,
                    display_name: UNKNOWN_PARTICIPANT.to_string(),
                    acquisition_cost: Cost::ZERO,
                })
        })
        .collect();
    members.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    let mut events: Vec<EventLine> = snapshot
        .events
        .iter()
        .filter(|e| member_ids.contains(&e.participant_id))
        .map(|e| resolve_event(snapshot, e))
        .collect();
    events.reverse(); // ledger is append-ordered; detail shows newest first

    let score: Points = events.iter().map(|e| e.point_delta).sum();

    Some(TeamDetail {
        team_id,
        display_name: team.display_name.clone(),
        owner_display_name: team.owner_display_name.clone(),
        members,
        budget_total: team.budget.total,
        budget_committed: team.budget.committed,
        budget_remaining: team.budget.remaining(),
        score,
        events,
    })
}

/// Recent scoring activity across the whole league, newest first.
pub fn event_feed(snapshot: &LeagueSnapshot, limit: usize) -> Vec<EventLine> {
    snapshot
        .events
        .iter()
        .rev()
        .take(limit)
        .map(|e| resolve_event(snapshot, e))
        .collect()
}
