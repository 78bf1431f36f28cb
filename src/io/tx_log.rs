//! Daily transaction log
//!
//! This module provides the TransactionLog component that buffers the
//! records produced during one login session and writes them to the daily
//! transactions file at logout. Line encoding is delegated to the
//! fixed_format module.
//!
//! # Flush Semantics
//!
//! `write_and_clear` overwrites the target file in full: one fixed-width
//! line per buffered record in insertion order, then the terminal
//! end-of-session sentinel. The in-memory buffer is cleared whether or not
//! the write succeeds, so a failed flush drops the session's records and
//! still leaves the next session with an empty buffer. The write itself
//! goes through a temporary file and rename, so the previous log file
//! survives a failed flush intact.

use crate::io::fixed_format;
use crate::types::{TellerError, TransactionRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Ordered buffer of one session's transaction records
pub struct TransactionLog {
    /// Path of the daily transactions file
    path: PathBuf,
    /// Records buffered since the last flush, in insertion order
    records: Vec<TransactionRecord>,
}

impl TransactionLog {
    /// Create a log for the given path with an empty buffer
    pub fn new(path: &Path) -> Self {
        TransactionLog {
            path: path.to_path_buf(),
            records: Vec::new(),
        }
    }

    /// Append a record to the session buffer
    pub fn add(&mut self, record: TransactionRecord) {
        self.records.push(record);
    }

    /// The records buffered since the last flush
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// Whether the session buffer holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the buffered records to the transactions file and clear
    ///
    /// The file is replaced in full with one 40-character line per record
    /// followed by the end-of-session sentinel line. The buffer is
    /// cleared before returning, on success and on failure alike.
    ///
    /// # Errors
    ///
    /// Returns `TellerError::Persistence` if the file cannot be written;
    /// the buffered records are discarded regardless.
    pub fn write_and_clear(&mut self) -> Result<(), TellerError> {
        let result = self.write_file();
        let count = self.records.len();
        self.records.clear();

        match &result {
            Ok(()) => {
                info!(path = %self.path.display(), count, "Wrote transaction log");
            }
            Err(e) => {
                warn!(error = %e, count, "Transaction buffer dropped after failed write");
            }
        }
        result
    }

    fn write_file(&self) -> Result<(), TellerError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;

        for record in &self.records {
            writeln!(tmp, "{}", fixed_format::encode_transaction_line(record))?;
        }
        writeln!(
            tmp,
            "{}",
            fixed_format::encode_transaction_line(&TransactionRecord::end_of_session())
        )?;
        tmp.flush()?;

        tmp.persist(&self.path)
            .map_err(|e| TellerError::persistence(&e.to_string()))?;
        Ok(())
    }
}
