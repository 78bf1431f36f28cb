//! Error types for the Rust Teller Engine
//!
//! This module defines all error types that can occur while validating and
//! applying session operations. Errors are designed to be descriptive and
//! user-friendly for console output.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Negative amounts, insufficient funds, missing or
//!   disabled accounts, bad company codes, etc.
//! - **Privilege Errors**: Standard sessions attempting admin operations,
//!   ownership and holder-name mismatches, session limits.
//! - **Arithmetic Errors**: Overflow in balance or ledger calculations.
//! - **Persistence Errors**: Failures loading or saving the accounts file or
//!   flushing the transaction log.

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the teller engine
///
/// This enum represents all possible errors that can occur during
/// operation processing. Each variant includes relevant context
/// to help diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TellerError {
    /// Transaction amount is negative
    ///
    /// This is a recoverable error - the operation is rejected before
    /// any account state changes.
    #[error("Transaction amount cannot be negative: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Insufficient funds for a debit
    ///
    /// This is a recoverable error - the debit is rejected and the
    /// account balance remains unchanged.
    #[error(
        "Insufficient funds for account {account}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account identifier
        account: String,
        /// Available balance
        available: Decimal,
        /// Requested debit amount
        requested: Decimal,
    },

    /// Account does not exist in the store
    ///
    /// This is a recoverable error - the operation is rejected.
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account identifier that was not found
        account: String,
    },

    /// Account exists but is disabled
    ///
    /// This is a recoverable error - the operation is rejected.
    #[error("Account {account} is disabled")]
    AccountDisabled {
        /// Account identifier of the disabled account
        account: String,
    },

    /// Standard session targeting an account it does not hold
    ///
    /// The session's holder name must match the account's stored name
    /// (case-insensitive, trimmed). This is a recoverable error.
    #[error("Account {account} is not held by {holder}")]
    OwnershipMismatch {
        /// Account identifier
        account: String,
        /// Holder name of the current session
        holder: String,
    },

    /// Transfer destination account does not exist
    ///
    /// Checked before the source account is validated.
    /// This is a recoverable error.
    #[error("Destination account {account} not found")]
    DestinationNotFound {
        /// Destination account identifier
        account: String,
    },

    /// Bill payment company code is not recognized
    ///
    /// Only EC, CQ and FI are accepted (case-insensitive). Checked before
    /// the account is validated. This is a recoverable error.
    #[error("Invalid company code '{code}' (expected EC, CQ, or FI)")]
    InvalidCompanyCode {
        /// The rejected company code
        code: String,
    },

    /// Cumulative session limit would be exceeded
    ///
    /// Standard sessions only; the operation is rejected and the session
    /// total is left unchanged. This is a recoverable error.
    #[error("Standard session {kind} limit is ${limit}")]
    LimitExceeded {
        /// Operation kind ("withdrawal", "transfer", "bill payment")
        kind: String,
        /// The per-session limit for that kind
        limit: Decimal,
    },

    /// Admin-only operation attempted from a non-admin session
    ///
    /// Checked before all other validation. This is a recoverable error.
    #[error("Admin session required for {operation}")]
    AdminRequired {
        /// Operation that was attempted
        operation: String,
    },

    /// Holder name exceeds the 20-character field width
    ///
    /// Applies to account creation only; existing names are truncated by
    /// the codec instead. This is a recoverable error.
    #[error("Account holder name '{name}' exceeds 20 characters")]
    NameTooLong {
        /// The rejected holder name (trimmed)
        name: String,
    },

    /// Initial balance outside the accepted range
    ///
    /// Account creation requires a balance between 0.00 and 99999.99.
    /// This is a recoverable error.
    #[error("Initial balance must be between 0.00 and 99999.99, got {balance}")]
    InvalidInitialBalance {
        /// The rejected initial balance
        balance: Decimal,
    },

    /// Supplied holder name does not match the target account
    ///
    /// Admin lifecycle operations (delete, disable, changeplan) require a
    /// case-insensitive match. This is a recoverable error.
    #[error("Holder name '{holder}' does not match account {account}")]
    HolderMismatch {
        /// Account identifier
        account: String,
        /// The supplied holder name
        holder: String,
    },

    /// Arithmetic overflow would occur
    ///
    /// This is a recoverable error - the operation is rejected to
    /// maintain account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account identifier
        account: String,
    },

    /// I/O failure loading or saving account state, or flushing the log
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description of the underlying I/O error
        message: String,
    },
}

// Conversion from io::Error to TellerError
impl From<std::io::Error> for TellerError {
    fn from(error: std::io::Error) -> Self {
        TellerError::Persistence {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl TellerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        TellerError::InvalidAmount { amount }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &str, available: Decimal, requested: Decimal) -> Self {
        TellerError::InsufficientFunds {
            account: account.to_string(),
            available,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: &str) -> Self {
        TellerError::AccountNotFound {
            account: account.to_string(),
        }
    }

    /// Create an AccountDisabled error
    pub fn account_disabled(account: &str) -> Self {
        TellerError::AccountDisabled {
            account: account.to_string(),
        }
    }

    /// Create an OwnershipMismatch error
    pub fn ownership_mismatch(account: &str, holder: &str) -> Self {
        TellerError::OwnershipMismatch {
            account: account.to_string(),
            holder: holder.to_string(),
        }
    }

    /// Create a DestinationNotFound error
    pub fn destination_not_found(account: &str) -> Self {
        TellerError::DestinationNotFound {
            account: account.to_string(),
        }
    }

    /// Create an InvalidCompanyCode error
    pub fn invalid_company_code(code: &str) -> Self {
        TellerError::InvalidCompanyCode {
            code: code.to_string(),
        }
    }

    /// Create a LimitExceeded error
    pub fn limit_exceeded(kind: &str, limit: Decimal) -> Self {
        TellerError::LimitExceeded {
            kind: kind.to_string(),
            limit,
        }
    }

    /// Create an AdminRequired error
    pub fn admin_required(operation: &str) -> Self {
        TellerError::AdminRequired {
            operation: operation.to_string(),
        }
    }

    /// Create a NameTooLong error
    pub fn name_too_long(name: &str) -> Self {
        TellerError::NameTooLong {
            name: name.to_string(),
        }
    }

    /// Create an InvalidInitialBalance error
    pub fn invalid_initial_balance(balance: Decimal) -> Self {
        TellerError::InvalidInitialBalance { balance }
    }

    /// Create a HolderMismatch error
    pub fn holder_mismatch(account: &str, holder: &str) -> Self {
        TellerError::HolderMismatch {
            account: account.to_string(),
            holder: holder.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &str) -> Self {
        TellerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a Persistence error
    pub fn persistence(message: &str) -> Self {
        TellerError::Persistence {
            message: message.to_string(),
        }
    }
}
