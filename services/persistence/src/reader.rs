//! Journal Reader — Sequential reader with corruption detection
//!
//! Reads the journal file front to back, validating CRC32C checksums and
//! sequence gaplessness. A torn write at the tail (crash mid-append) is
//! expected and recoverable: the reader stops at the first bad frame and
//! returns the valid prefix plus a corruption report, and the writer then
//! continues from the last good sequence.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::journal::{JournalEntry, JournalError, JOURNAL_FILE};
use crate::records::LedgerRecord;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),
}

// ── Corruption Reporting ────────────────────────────────────────────

/// Why reading stopped before the end of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptionKind {
    /// Stored checksum does not match the recomputed one.
    ChecksumMismatch,
    /// Frame extends past the end of the file (torn write).
    TruncatedEntry,
    /// Sequence numbering broke (gap, duplicate, or regression).
    SequenceBreak,
    /// Checksum was fine but the payload is not a decodable record.
    UndecodableRecord,
}

/// Structured report of where and why the journal stopped being readable.
#[derive(Debug, Clone)]
pub struct CorruptionRecord {
    /// Byte offset in the file where the bad frame starts.
    pub byte_offset: u64,
    pub kind: CorruptionKind,
    pub detail: String,
}

// ── Recovery Result ─────────────────────────────────────────────────

/// The valid prefix of the journal plus everything needed to resume.
#[derive(Debug)]
pub struct Recovery {
    /// Decoded records in append order, paired with their entry metadata.
    pub entries: Vec<(JournalEntry, LedgerRecord)>,
    /// Set when the file had a bad tail; the prefix above is still usable.
    pub corruption: Option<CorruptionRecord>,
}

impl Recovery {
    /// Sequence the writer should continue from.
    pub fn next_sequence(&self) -> u64 {
        self.entries.last().map(|(e, _)| e.sequence + 1).unwrap_or(1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Journal Reader ──────────────────────────────────────────────────

/// Sequential journal reader with checksum validation.
pub struct JournalReader {
    path: PathBuf,
    data: Vec<u8>,
    pos: usize,
}

impl JournalReader {
    /// Open the journal file under `dir`. A missing file reads as empty.
    pub fn open(dir: &Path) -> Result<Self, ReaderError> {
        let path = dir.join(JOURNAL_FILE);
        let data = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, data, pos: 0 })
    }

    /// Journal file path this reader was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every valid entry from the start of the file.
    ///
    /// Never fails on content problems: the valid prefix is returned and
    /// the first anomaly, if any, is described in `corruption`.
    pub fn read_all(mut self) -> Recovery {
        let mut entries: Vec<(JournalEntry, LedgerRecord)> = Vec::new();
        let mut corruption = None;
        let mut expected_sequence: u64 = 1;

        while self.pos < self.data.len() {
            let offset = self.pos as u64;

            let (entry, consumed) = match JournalEntry::from_bytes(&self.data[self.pos..]) {
                Ok(ok) => ok,
                Err(e) => {
                    corruption = Some(CorruptionRecord {
                        byte_offset: offset,
                        kind: CorruptionKind::TruncatedEntry,
                        detail: e.to_string(),
                    });
                    break;
                }
            };

            if !entry.verify_checksum() {
                corruption = Some(CorruptionRecord {
                    byte_offset: offset,
                    kind: CorruptionKind::ChecksumMismatch,
                    detail: format!("entry seq={} failed checksum", entry.sequence),
                });
                break;
            }

            if entry.sequence != expected_sequence {
                corruption = Some(CorruptionRecord {
                    byte_offset: offset,
                    kind: CorruptionKind::SequenceBreak,
                    detail: format!(
                        "expected sequence {}, got {}",
                        expected_sequence, entry.sequence
                    ),
                });
                break;
            }

            let record = match entry.record() {
                Ok(record) => record,
                Err(e) => {
                    corruption = Some(CorruptionRecord {
                        byte_offset: offset,
                        kind: CorruptionKind::UndecodableRecord,
                        detail: e.to_string(),
                    });
                    break;
                }
            };

            expected_sequence = entry.sequence + 1;
            self.pos += consumed;
            entries.push((entry, record));
        }

        Recovery {
            entries,
            corruption,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
