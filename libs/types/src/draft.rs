//! Serializable draft selection value object

use crate::ids::{ParticipantId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The staged-but-uncommitted participant set a client sends to commit.
///
/// Draft state is advisory and lives only in the acting client; this value
/// object is the explicit form it takes when crossing into the commit
/// service. Discarding one is free and silent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSelection {
    pub team_id: TeamId,
    pub participants: BTreeSet<ParticipantId>,
}

impl DraftSelection {
    pub fn new(team_id: TeamId) -> Self {
        Self {
            team_id,
            participants: BTreeSet::new(),
        }
    }

    pub fn with_participants(
        team_id: TeamId,
        participants: impl IntoIterator<Item = ParticipantId>,
    ) -> Self {
        Self {
            team_id,
            participants: participants.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn contains(&self, id: &ParticipantId) -> bool {
        self.participants.contains(id)
    }
}
