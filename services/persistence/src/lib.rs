//! Durable league mutation log
//!
//! Provides the append-only journal for every mutation the league store
//! applies (team creation/rename, roster commits with captured costs,
//! scoring appends and revocations), plus a sequential reader with
//! checksum validation and corrupted-tail recovery. Replaying the journal
//! from the start reproduces the store state exactly.

pub mod journal;
pub mod reader;
pub mod records;

pub use journal::{JournalConfig, JournalEntry, JournalError, JournalWriter};
pub use reader::{JournalReader, ReaderError, Recovery};
pub use records::LedgerRecord;
