//! Roster draft session — client-side staging without side effects
//!
//! A session is built from a snapshot of the acting team (budget, committed
//! members) plus a copy of the catalog's price view; both may be stale by
//! the time the draft is committed, which is why the store re-validates
//! everything under its write lock. Discarding a session loses the draft
//! silently and intentionally.

use std::collections::{BTreeMap, BTreeSet};
use types::draft::DraftSelection;
use types::errors::DraftRejection;
use types::ids::{ParticipantId, TeamId};
use types::numeric::Cost;
use types::roster::MAX_ROSTER_SIZE;
use types::team::Budget;

/// What happened when one participant was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Participant staged.
    Added,
    /// Participant un-staged.
    Removed,
    /// Already a committed member; committed lines cannot be touched here.
    AlreadyCommitted,
    /// Adding would push committed + staged past the roster cap.
    RosterFull,
    /// Not in the price view this session was built from.
    UnknownParticipant,
}

/// Validate a set of staged costs against authoritative team state.
///
/// Shared between the client-side session (`can_commit`) and the store's
/// server-side re-validation. Checks in order:
/// 1. Draft is non-empty
/// 2. Committed + staged count within the roster cap
/// 3. Summed staged cost within the remaining budget
///
/// Returns the total draft cost on success.
pub fn validate_draft(
    committed_count: usize,
    budget: &Budget,
    staged_costs: &[Cost],
) -> Result<Cost, DraftRejection> {
    if staged_costs.is_empty() {
        return Err(DraftRejection::EmptyDraft);
    }

    if committed_count + staged_costs.len() > MAX_ROSTER_SIZE {
        return Err(DraftRejection::RosterFull {
            committed: committed_count,
            staged: staged_costs.len(),
            max: MAX_ROSTER_SIZE,
        });
    }

    // Saturating sum: a total past the numeric ceiling can never fit a
    // budget, so it must reject rather than wrap to a small value.
    let draft_cost = staged_costs
        .iter()
        .fold(Cost::ZERO, |acc, c| acc.saturating_add(*c));
    if draft_cost > budget.remaining() {
        return Err(DraftRejection::OverBudget {
            draft_cost,
            remaining: budget.remaining(),
        });
    }

    Ok(draft_cost)
}

/// A transient, per-team working selection of candidate participants.
#[derive(Debug, Clone)]
pub struct DraftSession {
    team_id: TeamId,
    budget: Budget,
    committed: BTreeSet<ParticipantId>,
    prices: BTreeMap<ParticipantId, Cost>,
    staged: BTreeSet<ParticipantId>,
}

impl DraftSession {
    /// Start an empty session from a team snapshot and catalog price view.
    pub fn new(
        team_id: TeamId,
        budget: Budget,
        committed: impl IntoIterator<Item = ParticipantId>,
        prices: BTreeMap<ParticipantId, Cost>,
    ) -> Self {
        Self {
            team_id,
            budget,
            committed: committed.into_iter().collect(),
            prices,
            staged: BTreeSet::new(),
        }
    }

    /// Stage a participant if absent and constraints allow, un-stage if
    /// present. Removal is always allowed; adding is rejected for committed
    /// members, unknown ids, and roster-cap overflows. Budget is NOT
    /// checked here: an over-budget draft stays visible so the client can
    /// show why `can_commit` is false.
    pub fn toggle(&mut self, id: ParticipantId) -> ToggleOutcome {
        if self.committed.contains(&id) {
            return ToggleOutcome::AlreadyCommitted;
        }
        if self.staged.remove(&id) {
            return ToggleOutcome::Removed;
        }
        if !self.prices.contains_key(&id) {
            return ToggleOutcome::UnknownParticipant;
        }
        if self.committed.len() + self.staged.len() >= MAX_ROSTER_SIZE {
            return ToggleOutcome::RosterFull;
        }
        self.staged.insert(id);
        ToggleOutcome::Added
    }

    /// Sum of costs of all currently staged ids, clamped at the ceiling.
    pub fn draft_cost(&self) -> Cost {
        self.staged
            .iter()
            .filter_map(|id| self.prices.get(id).copied())
            .fold(Cost::ZERO, |acc, c| acc.saturating_add(c))
    }

    pub fn draft_count(&self) -> usize {
        self.staged.len()
    }

    /// Whether toggling this id could add it to the draft.
    ///
    /// False once the combined count reaches the cap, unless the id is
    /// already staged (un-staging stays possible at the cap).
    pub fn is_selectable(&self, id: ParticipantId) -> bool {
        if self.staged.contains(&id) {
            return true;
        }
        if self.committed.contains(&id) {
            return false;
        }
        self.committed.len() + self.staged.len() < MAX_ROSTER_SIZE
    }

    /// Whether the current draft would pass commit validation.
    pub fn can_commit(&self) -> bool {
        let costs: Vec<Cost> = self
            .staged
            .iter()
            .filter_map(|id| self.prices.get(id).copied())
            .collect();
        validate_draft(self.committed.len(), &self.budget, &costs).is_ok()
    }

    /// Freeze the staged set into the value object the commit request
    /// carries.
    pub fn selection(&self) -> DraftSelection {
        DraftSelection::with_participants(self.team_id, self.staged.iter().copied())
    }

    pub fn team_id(&self) -> TeamId {
        self.team_id
    }

    pub fn staged(&self) -> impl Iterator<Item = &ParticipantId> {
        self.staged.iter()
    }
}
