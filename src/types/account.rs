//! Account-related types for the Rust Teller Engine
//!
//! This module defines the Account structure and related functionality
//! for managing branch account state.

use super::error::TellerError;
use super::transaction::AccountId;
use rust_decimal::Decimal;

/// Account standing
///
/// Disabled accounts reject all balance-affecting operations but can still
/// be targeted by admin lifecycle operations (delete, disable, changeplan).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Account accepts transactions
    Active,
    /// Account rejects transactions until re-enabled out of band
    Disabled,
}

impl AccountStatus {
    /// Status character used in the accounts file ('A' or 'D')
    pub fn as_char(&self) -> char {
        match self {
            AccountStatus::Active => 'A',
            AccountStatus::Disabled => 'D',
        }
    }

    /// Parse a status character leniently
    ///
    /// Anything other than 'D' is read as Active, matching the tolerant
    /// file-decoding policy (malformed rows degrade, they do not abort).
    pub fn from_char(c: char) -> Self {
        match c {
            'D' => AccountStatus::Disabled,
            _ => AccountStatus::Active,
        }
    }
}

/// Account fee plan
///
/// The plan is session-state only: the accounts file does not persist it,
/// so every loaded account starts on the standard plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountPlan {
    /// Standard plan ("SP")
    Standard,
    /// New plan ("NP"), set by the admin changeplan operation
    New,
}

impl AccountPlan {
    /// Two-character plan code used in transaction log misc fields
    pub fn code(&self) -> &'static str {
        match self {
            AccountPlan::Standard => "SP",
            AccountPlan::New => "NP",
        }
    }
}

/// Branch account state
///
/// Represents the current state of one account: identity, holder name,
/// standing, fee plan, and balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Canonical 5-digit account identifier (zero-padded)
    pub id: AccountId,

    /// Holder name, trimmed, at most 20 characters after encoding
    pub name: String,

    /// Whether the account accepts transactions
    pub status: AccountStatus,

    /// Fee plan, not persisted across runs
    pub plan: AccountPlan,

    /// Current balance
    ///
    /// Never negative: debit validates before subtracting, and credit
    /// only ever adds.
    pub balance: Decimal,
}

impl Account {
    /// Create a new active, standard-plan account
    ///
    /// # Arguments
    ///
    /// * `id` - Canonical 5-digit account identifier
    /// * `name` - Holder name (trimmed by the caller)
    /// * `balance` - Opening balance
    pub fn new(id: AccountId, name: String, balance: Decimal) -> Self {
        Account {
            id,
            name,
            status: AccountStatus::Active,
            plan: AccountPlan::Standard,
            balance,
        }
    }

    /// Add funds, using checked arithmetic
    ///
    /// Callers validate the amount sign before crediting.
    ///
    /// # Errors
    ///
    /// Returns `TellerError::ArithmeticOverflow` if the new balance would
    /// exceed the representable range. The balance is unchanged on error.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), TellerError> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| TellerError::arithmetic_overflow("credit", &self.id))?;
        Ok(())
    }

    /// Remove funds, validating first
    ///
    /// # Errors
    ///
    /// Returns `TellerError::InvalidAmount` if `amount` is negative, or
    /// `TellerError::InsufficientFunds` if `amount` exceeds the current
    /// balance. The balance is unchanged on error.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), TellerError> {
        if amount < Decimal::ZERO {
            return Err(TellerError::invalid_amount(amount));
        }
        if amount > self.balance {
            return Err(TellerError::insufficient_funds(
                &self.id,
                self.balance,
                amount,
            ));
        }
        self.balance -= amount;
        Ok(())
    }
}
