//! Rust Teller Engine Library
//! # Overview
//!
//! This library provides a single-branch ledger core: interactive teller
//! sessions validated against per-session rules, persisted in fixed-width
//! text files.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Session, TransactionRecord, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::service`] - Session operation rule engine
//!   - [`core::traits`] - Account store abstraction
//! - [`io`] - Fixed-width codec, account store, and transaction log
//! - [`front`] - Interactive console front end
//!
//! # Operations
//!
//! The engine supports nine session operations, each logged under a
//! two-digit code:
//!
//! - **Withdrawal** ("01"): Debit funds (requires sufficient balance)
//! - **Transfer** ("02"): Move funds between two accounts
//! - **Paybill** ("03"): Debit funds toward a registered company
//! - **Deposit** ("04"): Credit funds, applied at logout
//! - **Create** ("05"): Open a new account (admin)
//! - **Delete** ("06"): Remove an account (admin)
//! - **Disable** ("07"): Mark an account disabled (admin)
//! - **Changeplan** ("08"): Switch an account to the new plan (admin)
//!
//! A terminal "00" record closes every transaction file.
//!
//! # Session Kinds
//!
//! - **Standard**: bound to one holder name; withdrawals, transfers, and
//!   bill payments are capped per session at $500, $1000, and $2000
//! - **Admin**: unrestricted; the only kind allowed to run account
//!   lifecycle operations

// Module declarations
pub mod cli;
pub mod core;
pub mod front;
pub mod io;
pub mod types;

pub use crate::core::{AccountStore, TellerService};
pub use front::ConsoleFrontEnd;
pub use io::{FileAccountStore, TransactionLog};
pub use types::{
    Account, AccountId, AccountPlan, AccountStatus, CompanyCode, Session, SessionRole,
    SpendingKind, TellerError, TransactionRecord, TxCode,
};
