//! In-memory mirror of the external catalog store
//!
//! The catalog (participants with fixed acquisition costs, scoring actions
//! with fixed point deltas) is owned elsewhere; this mirror is built from a
//! serialized snapshot at startup and replaced wholesale on reload. All
//! reads are by-id lookups or deterministic listings; unresolved ids are
//! hard errors, never defaults.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BTreeMap;
use types::action::ScoringAction;
use types::errors::LeagueError;
use types::ids::{ActionId, ParticipantId};
use types::numeric::Cost;
use types::participant::Participant;

/// Serialized form of the external catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub participants: Vec<Participant>,
    pub actions: Vec<ScoringAction>,
}

/// Read-only catalog mirror with by-id lookups.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    participants: BTreeMap<ParticipantId, Participant>,
    actions: BTreeMap<ActionId, ScoringAction>,
}

impl Catalog {
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            participants: snapshot
                .participants
                .into_iter()
                .map(|p| (p.id, p))
                .collect(),
            actions: snapshot.actions.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    /// Parse a catalog from its JSON snapshot form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_snapshot(serde_json::from_str(json)?))
    }

    /// Export back to the snapshot form, id-ordered.
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            participants: self.participants.values().cloned().collect(),
            actions: self.actions.values().cloned().collect(),
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Result<&Participant, LeagueError> {
        self.participants
            .get(&id)
            .ok_or(LeagueError::UnknownParticipant(id))
    }

    pub fn participant_cost(&self, id: ParticipantId) -> Result<Cost, LeagueError> {
        Ok(self.participant(id)?.acquisition_cost)
    }

    pub fn action(&self, id: ActionId) -> Result<&ScoringAction, LeagueError> {
        self.actions.get(&id).ok_or(LeagueError::UnknownAction(id))
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Market listing order: most expensive first, then name.
    pub fn participants_by_cost(&self) -> Vec<&Participant> {
        let mut listing: Vec<&Participant> = self.participants.values().collect();
        listing.sort_by(|a, b| {
            b.acquisition_cost
                .cmp(&a.acquisition_cost)
                .then_with(|| a.display_name.cmp(&b.display_name))
        });
        listing
    }

    /// Action listing order: active first, highest delta first, then label.
    ///
    /// Inactive actions are hidden unless explicitly requested; they stay
    /// resolvable by id regardless.
    pub fn actions_for_listing(&self, include_inactive: bool) -> Vec<&ScoringAction> {
        let mut listing: Vec<&ScoringAction> = self
            .actions
            .values()
            .filter(|a| include_inactive || a.active)
            .collect();
        listing.sort_by(|a, b| {
            Reverse(a.active)
                .cmp(&Reverse(b.active))
                .then_with(|| b.point_delta.cmp(&a.point_delta))
                .then_with(|| a.label.cmp(&b.label))
        });
        listing
    }

    /// Cost-by-id view a draft session copies at construction.
    pub fn price_view(&self) -> BTreeMap<ParticipantId, Cost> {
        self.participants
            .iter()
            .map(|(id, p)| (*id, p.acquisition_cost))
            .collect()
    }
}
