//! Draftable participant catalog entry

use crate::ids::ParticipantId;
use crate::numeric::Cost;
use serde::{Deserialize, Serialize};

/// A person who can be drafted onto teams.
///
/// Owned by the external catalog store and read-only from the core's
/// perspective. The acquisition cost is fixed at catalog level; committed
/// roster history is priced from whatever the catalog said at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub display_name: String,
    pub acquisition_cost: Cost,
    pub photo_ref: Option<String>,
}

impl Participant {
    pub fn new(display_name: impl Into<String>, acquisition_cost: Cost) -> Self {
        Self {
            id: ParticipantId::new(),
            display_name: display_name.into(),
            acquisition_cost,
            photo_ref: None,
        }
    }
}
