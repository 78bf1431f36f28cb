//! Core traits for account storage
//!
//! This module defines the capability contract the rule engine operates
//! against, so the engine never touches file layout directly. The
//! production implementation is file-backed; tests can run against the
//! same contract with a throwaway path.

use crate::types::{Account, AccountId, TellerError};

/// Trait for keyed persistence of accounts
///
/// All identifier arguments accept arbitrary user input and are
/// normalized to canonical 5-digit form by the implementation before
/// lookup, so callers never pre-format.
pub trait AccountStore {
    /// Populate in-memory state from the backing medium
    ///
    /// Replaces any prior content. A missing backing file loads as an
    /// empty store rather than an error.
    fn load(&mut self) -> Result<(), TellerError>;

    /// Write the complete current state back to the backing medium
    fn save(&self) -> Result<(), TellerError>;

    /// Whether an account exists for the (normalized) identifier
    fn exists(&self, id: &str) -> bool;

    /// Borrow an account
    ///
    /// # Errors
    ///
    /// Returns `TellerError::AccountNotFound` if no account matches.
    fn get(&self, id: &str) -> Result<&Account, TellerError>;

    /// Mutably borrow an account
    ///
    /// # Errors
    ///
    /// Returns `TellerError::AccountNotFound` if no account matches.
    fn get_mut(&mut self, id: &str) -> Result<&mut Account, TellerError>;

    /// Insert an account, replacing any entry with the same identifier
    fn add(&mut self, account: Account);

    /// Remove an account if present; absent identifiers are a no-op
    fn remove(&mut self, id: &str);

    /// Next free identifier: (maximum numeric identifier) + 1, zero-padded
    ///
    /// Not collision-free across history: deleting the current maximum
    /// frees its identifier for reissue.
    fn next_account_id(&self) -> AccountId;
}
