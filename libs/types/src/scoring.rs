//! Append-only scoring ledger event

use crate::ids::{ActionId, EventId, ParticipantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point event attributed to one participant.
///
/// Append-only: never updated after insert; the single delete path is the
/// actor-scoped undo. The point delta is NOT stored here — it is resolved
/// by joining the scoring action at aggregation time, so re-pricing an
/// action changes history retroactively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringEvent {
    pub id: EventId,
    pub participant_id: ParticipantId,
    pub action_id: ActionId,
    pub recorded_by: UserId,
    pub recorded_at: DateTime<Utc>,
}

impl ScoringEvent {
    pub fn new(
        participant_id: ParticipantId,
        action_id: ActionId,
        recorded_by: UserId,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EventId::new(),
            participant_id,
            action_id,
            recorded_by,
            recorded_at,
        }
    }
}
