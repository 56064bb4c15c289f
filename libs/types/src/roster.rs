//! Roster membership and size cap

use crate::ids::{ParticipantId, TeamId};
use serde::{Deserialize, Serialize};

/// Hard cap on committed members per team.
pub const MAX_ROSTER_SIZE: usize = 6;

/// One committed roster line.
///
/// Unique per (team, participant) pair, insertion-ordered only. Membership
/// is not exclusive: the same participant may sit on any number of teams,
/// and scoring fans out to all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RosterMembership {
    pub team_id: TeamId,
    pub participant_id: ParticipantId,
}

impl RosterMembership {
    pub fn new(team_id: TeamId, participant_id: ParticipantId) -> Self {
        Self {
            team_id,
            participant_id,
        }
    }
}
