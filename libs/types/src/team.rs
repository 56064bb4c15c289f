//! Team and budget ledger types
//!
//! The budget ledger is the one piece of mutable accounting in the system.
//! Invariant: `committed <= total`, and after every successful roster
//! commit `committed` equals the summed acquisition cost of the team's
//! membership rows.

use crate::errors::DraftRejection;
use crate::ids::{TeamId, UserId};
use crate::numeric::Cost;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Budget granted to every team at creation.
pub const DEFAULT_BUDGET_TOTAL: Cost = Cost::new(500);

/// Display name used when the owner's profile has no usable name.
pub const DEFAULT_TEAM_NAME: &str = "My team";

/// Minimum length of a trimmed team display name.
pub const MIN_TEAM_NAME_LEN: usize = 2;

/// Per-team budget ledger.
///
/// Invariant: committed <= total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub total: Cost,
    pub committed: Cost,
}

impl Budget {
    /// Create a fresh ledger with nothing committed.
    pub fn new(total: Cost) -> Self {
        Self {
            total,
            committed: Cost::ZERO,
        }
    }

    /// Budget still available for drafting.
    pub fn remaining(&self) -> Cost {
        self.total.saturating_sub(self.committed)
    }

    /// Check ledger invariant: committed <= total
    pub fn check_invariant(&self) -> bool {
        self.committed <= self.total
    }

    /// Commit additional cost to the roster.
    ///
    /// The only mutating operation on the ledger; nothing ever decreases
    /// `committed` (no refunds are modeled). Fails without effect when the
    /// addition would exceed the total.
    pub fn commit(&mut self, additional: Cost) -> Result<(), DraftRejection> {
        let proposed = self
            .committed
            .checked_add(additional)
            .ok_or(DraftRejection::OverBudget {
                draft_cost: additional,
                remaining: self.remaining(),
            })?;
        if proposed > self.total {
            return Err(DraftRejection::OverBudget {
                draft_cost: additional,
                remaining: self.remaining(),
            });
        }
        self.committed = proposed;
        Ok(())
    }
}

/// A fantasy team, one per owning user.
///
/// `score` is deliberately absent: totals are always recomputed from the
/// scoring ledger join, never cached on the team row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub owner: UserId,
    pub owner_display_name: String,
    pub display_name: String,
    pub budget: Budget,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a team at first access.
    ///
    /// The display name falls back to a constant when the owner profile
    /// yields nothing usable.
    pub fn new(
        owner: UserId,
        owner_display_name: impl Into<String>,
        budget_total: Cost,
        created_at: DateTime<Utc>,
    ) -> Self {
        let owner_display_name = owner_display_name.into();
        let trimmed = owner_display_name.trim();
        let display_name = if trimmed.chars().count() >= MIN_TEAM_NAME_LEN {
            trimmed.to_string()
        } else {
            DEFAULT_TEAM_NAME.to_string()
        };
        Self {
            id: TeamId::new(),
            owner,
            owner_display_name,
            display_name,
            budget: Budget::new(budget_total),
            created_at,
        }
    }

    /// Validate and apply a new display name.
    pub fn rename(&mut self, name: &str) -> Result<(), DraftRejection> {
        let trimmed = name.trim();
        if trimmed.chars().count() < MIN_TEAM_NAME_LEN {
            return Err(DraftRejection::NameTooShort {
                min: MIN_TEAM_NAME_LEN,
            });
        }
        self.display_name = trimmed.to_string();
        Ok(())
    }
}
