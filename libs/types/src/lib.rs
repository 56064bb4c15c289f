//! Types library for the fantasy league platform
//!
//! This library provides all core type definitions shared across the league
//! services: identifiers, integer point/cost arithmetic, catalog entities,
//! teams and budgets, roster membership, the scoring ledger event, and the
//! error taxonomy.
//!
//! # Modules
//! - `ids`: Unique identifiers (TeamId, ParticipantId, ActionId, EventId, UserId)
//! - `numeric`: Integer money/point types (Cost, Points)
//! - `participant`: Draftable participant catalog entry
//! - `action`: Scoring action catalog entry
//! - `team`: Team and budget ledger types
//! - `roster`: Roster membership and size cap
//! - `draft`: Serializable draft selection value object
//! - `scoring`: Append-only scoring ledger event
//! - `snapshot`: Consistent read view for aggregation
//! - `identity`: Resolved actor identity
//! - `errors`: Error taxonomy

// Public modules
pub mod action;
pub mod draft;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod numeric;
pub mod participant;
pub mod roster;
pub mod scoring;
pub mod snapshot;
pub mod team;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::*;
    pub use crate::draft::*;
    pub use crate::errors::*;
    pub use crate::identity::*;
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::participant::*;
    pub use crate::roster::*;
    pub use crate::scoring::*;
    pub use crate::snapshot::*;
    pub use crate::team::*;
}
