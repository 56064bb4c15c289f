//! Error taxonomy for league operations
//!
//! Every error is local to a single operation; none of them can corrupt
//! the append-only scoring ledger, which has no multi-step writes. Only
//! membership/budget consistency is ever at risk, and that case has its
//! own distinct variant.

use crate::ids::{ActionId, ParticipantId, TeamId};
use crate::numeric::Cost;
use thiserror::Error;

/// Reasons a draft fails validation.
///
/// All recoverable: the caller adjusts the selection and retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftRejection {
    #[error("draft is empty")]
    EmptyDraft,

    #[error("roster full: {committed} committed + {staged} staged exceeds the cap of {max}")]
    RosterFull {
        committed: usize,
        staged: usize,
        max: usize,
    },

    #[error("over budget: draft costs {draft_cost} but only {remaining} remains")]
    OverBudget { draft_cost: Cost, remaining: Cost },

    #[error("team name must be at least {min} characters")]
    NameTooShort { min: usize },
}

/// Top-level league error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] DraftRejection),

    #[error("unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("unknown scoring action: {0}")]
    UnknownAction(ActionId),

    #[error("team not found: {0}")]
    TeamNotFound(TeamId),

    #[error("no scoring event recorded by this actor to undo")]
    NothingToUndo,

    #[error(
        "roster was saved but the budget total may be temporarily wrong \
         (recorded {recorded}, computed {computed}); refresh to confirm"
    )]
    PartialCommitInconsistency { recorded: Cost, computed: Cost },

    #[error("storage error: {0}")]
    Storage(String),
}

impl LeagueError {
    /// Stable machine-readable code for wire surfaces.
    pub fn code(&self) -> &'static str {
        match self {
            LeagueError::ValidationFailed(DraftRejection::OverBudget { .. }) => "OVER_BUDGET",
            LeagueError::ValidationFailed(_) => "VALIDATION_FAILED",
            LeagueError::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            LeagueError::UnknownAction(_) => "UNKNOWN_ACTION",
            LeagueError::TeamNotFound(_) => "TEAM_NOT_FOUND",
            LeagueError::NothingToUndo => "NOTHING_TO_UNDO",
            LeagueError::PartialCommitInconsistency { .. } => "PARTIAL_COMMIT",
            LeagueError::Storage(_) => "STORAGE",
        }
    }
}
