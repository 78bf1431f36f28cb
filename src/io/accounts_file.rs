//! File-backed account store
//!
//! This module provides the `FileAccountStore` struct which owns all account
//! state for the run and persists it in the fixed-width accounts file format.
//! Line layout and field decoding are delegated to the fixed_format module.
//!
//! The FileAccountStore is responsible for:
//! - Loading account state at startup, tolerating malformed lines
//! - Saving the complete state at shutdown, sorted, with a sentinel line
//! - Normalizing identifiers before every lookup
//! - Generating identifiers for newly created accounts
//!
//! # Durability
//!
//! Saves first write a temporary file in the destination directory and then
//! rename it over the target, so a failed save never leaves a truncated
//! accounts file behind.

use crate::core::traits::AccountStore;
use crate::io::fixed_format::{self, AccountLine};
use crate::types::{Account, AccountId, TellerError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Owns all account state, keyed by canonical identifier
///
/// The store maintains an in-memory map of identifiers to accounts. File
/// access happens only in `load` and `save`; everything else operates on
/// the map.
#[derive(Debug)]
pub struct FileAccountStore {
    /// Path of the backing accounts file
    path: PathBuf,
    /// Map of canonical identifiers to account state
    accounts: HashMap<AccountId, Account>,
}

impl FileAccountStore {
    /// Create a store for the given path without touching the file
    ///
    /// The store starts empty; call `load` to read the backing file.
    pub fn new(path: &Path) -> Self {
        FileAccountStore {
            path: path.to_path_buf(),
            accounts: HashMap::new(),
        }
    }
}

impl AccountStore for FileAccountStore {
    /// Load account state from the backing file
    ///
    /// Replaces any prior in-memory content. Lines are decoded leniently:
    /// short lines are skipped, and loading stops at the sentinel line. A
    /// missing file is not an error - the store simply starts empty.
    ///
    /// # Errors
    ///
    /// Returns `TellerError::Persistence` for I/O failures other than a
    /// missing file.
    fn load(&mut self) -> Result<(), TellerError> {
        self.accounts.clear();

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Accounts file not found, starting empty");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let reader = BufReader::new(file);
        for line in reader.lines() {
            let line = line?;
            match fixed_format::decode_account_line(&line) {
                AccountLine::Entry(account) => {
                    self.accounts.insert(account.id.clone(), account);
                }
                AccountLine::EndOfFile => break,
                AccountLine::Skipped => {
                    debug!(length = line.chars().count(), "Skipping short accounts line");
                }
            }
        }

        info!(path = %self.path.display(), count = self.accounts.len(), "Loaded accounts");
        Ok(())
    }

    /// Save the complete account state to the backing file
    ///
    /// Accounts are written sorted by identifier, one fixed-width line
    /// each, followed by the sentinel line. The write goes to a temporary
    /// file in the destination directory and is renamed into place.
    ///
    /// # Errors
    ///
    /// Returns `TellerError::Persistence` if the temporary file cannot be
    /// created, written, or renamed over the target.
    fn save(&self) -> Result<(), TellerError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;

        let mut sorted: Vec<&Account> = self.accounts.values().collect();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));

        for account in &sorted {
            writeln!(tmp, "{}", fixed_format::encode_account_line(account))?;
        }
        writeln!(tmp, "{}", fixed_format::accounts_sentinel_line())?;
        tmp.flush()?;

        tmp.persist(&self.path)
            .map_err(|e| TellerError::persistence(&e.to_string()))?;

        info!(path = %self.path.display(), count = sorted.len(), "Saved accounts");
        Ok(())
    }

    fn exists(&self, id: &str) -> bool {
        self.accounts
            .contains_key(&fixed_format::account_field(id))
    }

    fn get(&self, id: &str) -> Result<&Account, TellerError> {
        let key = fixed_format::account_field(id);
        self.accounts
            .get(&key)
            .ok_or_else(|| TellerError::account_not_found(&key))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Account, TellerError> {
        let key = fixed_format::account_field(id);
        self.accounts
            .get_mut(&key)
            .ok_or_else(|| TellerError::account_not_found(&key))
    }

    fn add(&mut self, account: Account) {
        self.accounts
            .insert(fixed_format::account_field(&account.id), account);
    }

    fn remove(&mut self, id: &str) {
        self.accounts.remove(&fixed_format::account_field(id));
    }

    /// Next free identifier: one past the current numeric maximum
    ///
    /// Identifiers that fail to parse as integers do not contribute to the
    /// maximum. An empty store yields "00001".
    fn next_account_id(&self) -> AccountId {
        let max = self
            .accounts
            .keys()
            .map(|key| key.parse::<i32>().unwrap_or(0))
            .max()
            .unwrap_or(0);
        format!("{:05}", max + 1)
    }
}
