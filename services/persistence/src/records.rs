//! Journaled mutation records
//!
//! One record per successful store mutation, bincode-encoded into journal
//! entry payloads. `MembersCommitted` captures the cost of every staged
//! participant at commit time: replay must restore the budget ledger to
//! exactly what was committed, regardless of later catalog re-pricing.

use serde::{Deserialize, Serialize};
use types::ids::{EventId, ParticipantId, TeamId};
use types::numeric::Cost;
use types::scoring::ScoringEvent;
use types::team::Team;

use crate::journal::JournalError;

/// One staged participant with its catalog cost captured at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedMember {
    pub participant_id: ParticipantId,
    pub cost: Cost,
}

/// A single durable league mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerRecord {
    /// A team came into existence (lazy, at first access).
    TeamCreated { team: Team },
    /// A team owner renamed their team.
    TeamRenamed {
        team_id: TeamId,
        display_name: String,
    },
    /// A draft was committed: membership rows plus the ledger charge.
    MembersCommitted {
        team_id: TeamId,
        members: Vec<CommittedMember>,
        total_cost: Cost,
    },
    /// A scoring event was appended to the ledger.
    EventAppended { event: ScoringEvent },
    /// A scoring event was removed by the actor-scoped undo.
    EventRevoked { event_id: EventId },
}

impl LedgerRecord {
    /// Short label for logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            LedgerRecord::TeamCreated { .. } => "team_created",
            LedgerRecord::TeamRenamed { .. } => "team_renamed",
            LedgerRecord::MembersCommitted { .. } => "members_committed",
            LedgerRecord::EventAppended { .. } => "event_appended",
            LedgerRecord::EventRevoked { .. } => "event_revoked",
        }
    }

    /// Encode for a journal entry payload.
    pub fn to_payload(&self) -> Result<Vec<u8>, JournalError> {
        bincode::serialize(self).map_err(|e| JournalError::Serialization(e.to_string()))
    }

    /// Decode from a journal entry payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, JournalError> {
        bincode::deserialize(payload).map_err(|e| JournalError::Serialization(e.to_string()))
    }
}
