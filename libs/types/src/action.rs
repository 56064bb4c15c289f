//! Scoring action catalog entry

use crate::ids::ActionId;
use crate::numeric::Points;
use serde::{Deserialize, Serialize};

/// A scoring action definition (bonus or malus).
///
/// `code` is a stable machine-generated key, unique across the catalog.
/// Deactivation hides an action from future selection but never deletes
/// it: every ledger event referencing it must keep resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringAction {
    pub id: ActionId,
    pub code: String,
    pub label: String,
    pub description: Option<String>,
    pub point_delta: Points,
    pub active: bool,
}

impl ScoringAction {
    pub fn new(code: impl Into<String>, label: impl Into<String>, point_delta: Points) -> Self {
        Self {
            id: ActionId::new(),
            code: code.into(),
            label: label.into(),
            description: None,
            point_delta,
            active: true,
        }
    }

    /// Whether this action is a penalty.
    pub fn is_malus(&self) -> bool {
        self.point_delta < Points::ZERO
    }
}
