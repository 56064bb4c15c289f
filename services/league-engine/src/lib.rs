//! League engine — authoritative state and mutation discipline
//!
//! Owns the in-memory source of truth for teams, rosters, and the scoring
//! ledger, with every mutation journaled and re-validated against current
//! state inside one critical section (last-validate-then-write). Draft
//! staging is client-side and advisory; only commits change anything.
//!
//! ```text
//!   Catalog mirror ──▶ DraftSession (staging, advisory)
//!                          │ DraftSelection
//!                          ▼
//!   LeagueStore ◀── commit_roster / append_event / undo_last
//!        │ journal (WAL)            │
//!        ▼                          ▼
//!   persistence::JournalWriter   LeagueSnapshot ──▶ scoreboard
//! ```

pub mod catalog;
pub mod draft;
pub mod store;

pub use catalog::{Catalog, CatalogSnapshot};
pub use draft::{validate_draft, DraftSession, ToggleOutcome};
pub use store::{
    AppendOutcome, CommitOutcome, LeagueStore, ReconcileReport, StoreConfig, UndoOutcome,
};

/// Service version for diagnostics.
pub const SERVICE_VERSION: &str = "0.1.0";
