//! Journal Writer — Append-only mutation journal with checksums
//!
//! Every successful store mutation becomes one entry in a single
//! append-only file. Entries carry gapless monotonic sequence numbers and
//! a CRC32C checksum so the reader can detect torn or tampered tails.
//!
//! # Binary Format (per entry)
//! ```text
//! [body_len:  u32]
//! [sequence:  u64]
//! [timestamp: i64]  // Unix milliseconds
//! [payload_len: u32][payload: bincode LedgerRecord]
//! [checksum: u32]   // CRC32C over sequence+timestamp+payload
//! ```

use crc32c::crc32c;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::reader::Recovery;
use crate::records::LedgerRecord;

/// File name of the single journal file inside the journal directory.
pub const JOURNAL_FILE: &str = "league.journal";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Sequence error: expected {expected}, got {got}")]
    SequenceError { expected: u64, got: u64 },
}

// ── Journal Entry ───────────────────────────────────────────────────

/// A single journal entry holding one encoded `LedgerRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Gapless monotonic sequence number, starting at 1.
    pub sequence: u64,
    /// Unix millisecond timestamp of the mutation.
    pub timestamp: i64,
    /// Bincode-serialized `LedgerRecord`.
    pub payload: Vec<u8>,
    /// CRC32C checksum over (sequence ++ timestamp ++ payload).
    pub checksum: u32,
}

impl JournalEntry {
    /// Create a new entry, computing the CRC32C checksum automatically.
    pub fn new(sequence: u64, timestamp: i64, payload: Vec<u8>) -> Self {
        let checksum = Self::compute_checksum(sequence, timestamp, &payload);
        Self {
            sequence,
            timestamp,
            payload,
            checksum,
        }
    }

    /// Build an entry from a typed record.
    pub fn from_record(
        sequence: u64,
        timestamp: i64,
        record: &LedgerRecord,
    ) -> Result<Self, JournalError> {
        Ok(Self::new(sequence, timestamp, record.to_payload()?))
    }

    /// Decode the payload back into a typed record.
    pub fn record(&self) -> Result<LedgerRecord, JournalError> {
        LedgerRecord::from_payload(&self.payload)
    }

    /// Compute CRC32C over the concatenation of (sequence, timestamp, payload).
    pub fn compute_checksum(sequence: u64, timestamp: i64, payload: &[u8]) -> u32 {
        let mut buf = Vec::with_capacity(8 + 8 + payload.len());
        buf.extend_from_slice(&sequence.to_le_bytes());
        buf.extend_from_slice(&timestamp.to_le_bytes());
        buf.extend_from_slice(payload);
        crc32c(&buf)
    }

    /// Validate the stored checksum against the recomputed value.
    pub fn verify_checksum(&self) -> bool {
        self.checksum == Self::compute_checksum(self.sequence, self.timestamp, &self.payload)
    }

    /// Serialize entry to the binary wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let payload_len = self.payload.len() as u32;

        // body = 8 (seq) + 8 (ts) + 4 (pl_len) + payload + 4 (crc)
        let body_len: u32 = 8 + 8 + 4 + payload_len + 4;

        let mut buf = Vec::with_capacity(4 + body_len as usize);
        buf.extend_from_slice(&body_len.to_le_bytes());
        buf.extend_from_slice(&self.sequence.to_le_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&payload_len.to_le_bytes());
        buf.extend_from_slice(&self.payload);
        buf.extend_from_slice(&self.checksum.to_le_bytes());
        buf
    }

    /// Deserialize entry from the binary wire format.
    ///
    /// Returns `(entry, bytes_consumed)` on success. Corrupt or truncated
    /// input yields an error, never a panic.
    pub fn from_bytes(data: &[u8]) -> Result<(Self, usize), JournalError> {
        if data.len() < 4 {
            return Err(JournalError::Serialization(
                "not enough data for length prefix".into(),
            ));
        }

        let body_len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        // Reject implausible lengths early; a giant value means corruption.
        if body_len > 16_000_000 {
            return Err(JournalError::Serialization(format!(
                "implausible body length: {}",
                body_len
            )));
        }

        let total = 4 + body_len;
        if data.len() < total {
            return Err(JournalError::Serialization(format!(
                "incomplete entry: need {} bytes, have {}",
                total,
                data.len()
            )));
        }

        // Minimum body: 8 (seq) + 8 (ts) + 4 (pl_len) + 0 (payload) + 4 (crc)
        if body_len < 24 {
            return Err(JournalError::Serialization(format!(
                "body too small: {} bytes, minimum is 24",
                body_len
            )));
        }

        let body = &data[4..total];
        let mut pos: usize = 0;

        let sequence = u64::from_le_bytes(body[pos..pos + 8].try_into().unwrap());
        pos += 8;

        let timestamp = i64::from_le_bytes(body[pos..pos + 8].try_into().unwrap());
        pos += 8;

        let payload_len = u32::from_le_bytes(body[pos..pos + 4].try_into().unwrap()) as usize;
        pos += 4;

        if pos + payload_len + 4 != body.len() {
            return Err(JournalError::Serialization(format!(
                "payload_len {} does not match body size {}",
                payload_len,
                body.len()
            )));
        }
        let payload = body[pos..pos + payload_len].to_vec();
        pos += payload_len;

        let checksum = u32::from_le_bytes(body[pos..pos + 4].try_into().unwrap());

        let entry = Self {
            sequence,
            timestamp,
            payload,
            checksum,
        };

        Ok((entry, total))
    }
}

// ── Journal Writer Configuration ────────────────────────────────────

/// Configuration for the journal writer.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Directory holding the journal file.
    pub dir: PathBuf,
    /// Fsync after every append. Turning this off trades durability of the
    /// last few entries for write latency.
    pub fsync_every_write: bool,
}

impl JournalConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fsync_every_write: true,
        }
    }

    /// Path of the journal file under `dir`.
    pub fn journal_path(&self) -> PathBuf {
        self.dir.join(JOURNAL_FILE)
    }
}

// ── Journal Writer ──────────────────────────────────────────────────

/// Append-only journal writer with checksums and fsync control.
///
/// The league journal is small (one entry per human action over one
/// event), so there is no rotation: a single file holds the full history
/// and replay always starts from the beginning.
pub struct JournalWriter {
    config: JournalConfig,
    writer: BufWriter<File>,
    path: PathBuf,
    next_sequence: u64,
}

impl JournalWriter {
    /// Open the journal for appending, creating directory and file if needed.
    ///
    /// The caller is expected to set the next sequence after replaying the
    /// existing file, otherwise appends start at 1.
    pub fn open(config: JournalConfig) -> Result<Self, JournalError> {
        fs::create_dir_all(&config.dir)?;
        let path = config.journal_path();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            config,
            writer: BufWriter::new(file),
            path,
            next_sequence: 1,
        })
    }

    /// Open the journal for appending after a replay.
    ///
    /// When recovery stopped at a bad frame, the file still ends in the
    /// unreadable bytes; appending behind them would put every new entry
    /// past the point any future replay can reach. The file is therefore
    /// truncated to the valid prefix first, and the sequence resumes from
    /// the last entry that survived.
    pub fn open_resuming(config: JournalConfig, recovery: &Recovery) -> Result<Self, JournalError> {
        if let Some(corruption) = &recovery.corruption {
            let path = config.journal_path();
            let file = OpenOptions::new().write(true).open(&path)?;
            file.set_len(corruption.byte_offset)?;
            file.sync_all()?;
        }

        let mut writer = Self::open(config)?;
        writer.set_next_sequence(recovery.next_sequence());
        Ok(writer)
    }

    /// Set the next expected sequence number (used after recovery).
    pub fn set_next_sequence(&mut self, seq: u64) {
        self.next_sequence = seq;
    }

    /// Get the next expected sequence number.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Get the journal file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a journal entry. Validates sequence gaplessness.
    pub fn append(&mut self, entry: &JournalEntry) -> Result<(), JournalError> {
        if entry.sequence != self.next_sequence {
            return Err(JournalError::SequenceError {
                expected: self.next_sequence,
                got: entry.sequence,
            });
        }

        let bytes = entry.to_bytes();
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        if self.config.fsync_every_write {
            self.writer.get_ref().sync_all()?;
        }

        self.next_sequence = entry.sequence + 1;
        Ok(())
    }

    /// Encode a record and append it in one call, returning the entry.
    pub fn append_record(
        &mut self,
        timestamp: i64,
        record: &LedgerRecord,
    ) -> Result<JournalEntry, JournalError> {
        let entry = JournalEntry::from_record(self.next_sequence, timestamp, record)?;
        self.append(&entry)?;
        Ok(entry)
    }

    /// Force flush + fsync (used before shutdown).
    pub fn sync(&mut self) -> Result<(), JournalError> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }
}

// ── Tests ───────────────────────────────────────────────────────────
