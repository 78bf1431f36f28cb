//! Transaction-related types for the Rust Teller Engine
//!
//! This module defines operation codes, company codes, and the log record
//! produced for every state-changing operation in a session.

use rust_decimal::Decimal;

/// Account identifier
///
/// Canonical form is a 5-digit zero-padded string ("00001"); the codec
/// normalizes arbitrary input into this form.
pub type AccountId = String;

/// Operation codes written to the daily transaction log
///
/// Each variant maps to the two-character code that identifies the
/// operation in the fixed-width log format. EndOfSession is the
/// terminal sentinel appended on every flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxCode {
    /// Terminal sentinel record ("00")
    EndOfSession,
    /// Withdrawal from an account ("01")
    Withdrawal,
    /// Transfer between two accounts ("02"), logged from the source side
    Transfer,
    /// Bill payment to a registered company ("03")
    Paybill,
    /// Deposit, applied at logout ("04")
    Deposit,
    /// Account creation ("05")
    Create,
    /// Account deletion ("06")
    Delete,
    /// Account disable ("07")
    Disable,
    /// Plan change ("08")
    ChangePlan,
}

impl TxCode {
    /// Two-character code used in the log format
    pub fn as_str(&self) -> &'static str {
        match self {
            TxCode::EndOfSession => "00",
            TxCode::Withdrawal => "01",
            TxCode::Transfer => "02",
            TxCode::Paybill => "03",
            TxCode::Deposit => "04",
            TxCode::Create => "05",
            TxCode::Delete => "06",
            TxCode::Disable => "07",
            TxCode::ChangePlan => "08",
        }
    }
}

/// Companies registered for bill payment
///
/// Only these three are accepted; the code is matched case-insensitively
/// after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyCode {
    /// The electric company ("EC")
    Electric,
    /// Credit-card issuer Q ("CQ")
    CreditQ,
    /// Fast internet provider ("FI")
    FastInternet,
}

impl CompanyCode {
    /// Parse a user-supplied company code
    ///
    /// # Arguments
    ///
    /// * `code` - Raw input, trimmed and uppercased before matching
    ///
    /// # Returns
    ///
    /// The matching company, or None for anything unrecognized.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "EC" => Some(CompanyCode::Electric),
            "CQ" => Some(CompanyCode::CreditQ),
            "FI" => Some(CompanyCode::FastInternet),
            _ => None,
        }
    }

    /// Two-character company code used in log misc fields
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyCode::Electric => "EC",
            CompanyCode::CreditQ => "CQ",
            CompanyCode::FastInternet => "FI",
        }
    }
}

/// One logged operation
///
/// Immutable value describing a state-changing operation for the daily
/// transaction log. Records are buffered in memory during a session and
/// encoded to fixed 40-character lines on flush.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Operation code
    pub code: TxCode,

    /// Holder name recorded for the operation
    ///
    /// The session's own name for standard sessions, or the name the
    /// admin supplied (not validated against the account for
    /// balance-affecting operations).
    pub holder: String,

    /// Canonical 5-digit account identifier
    pub account: AccountId,

    /// Operation amount (zero for lifecycle operations)
    pub amount: Decimal,

    /// Two-character miscellaneous field
    ///
    /// Company code for bill payments, plan code for plan changes,
    /// blank otherwise.
    pub misc: String,
}

impl TransactionRecord {
    /// Create a record with an empty misc field
    pub fn new(code: TxCode, holder: &str, account: &str, amount: Decimal) -> Self {
        TransactionRecord {
            code,
            holder: holder.to_string(),
            account: account.to_string(),
            amount,
            misc: String::new(),
        }
    }

    /// Create a record carrying a misc field (company or plan code)
    pub fn with_misc(
        code: TxCode,
        holder: &str,
        account: &str,
        amount: Decimal,
        misc: &str,
    ) -> Self {
        TransactionRecord {
            code,
            holder: holder.to_string(),
            account: account.to_string(),
            amount,
            misc: misc.to_string(),
        }
    }

    /// The terminal sentinel record appended on every log flush
    pub fn end_of_session() -> Self {
        TransactionRecord::new(TxCode::EndOfSession, "", "00000", Decimal::ZERO)
    }
}
