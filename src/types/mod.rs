//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account entity, status, and plan types
//! - `session`: Per-login session state and spending limits
//! - `transaction`: Operation codes, company codes, and log records
//! - `error`: Error types for the teller engine

pub mod account;
pub mod error;
pub mod session;
pub mod transaction;

pub use account::{Account, AccountPlan, AccountStatus};
pub use error::TellerError;
pub use session::{Session, SessionRole, SpendingKind};
pub use transaction::{AccountId, CompanyCode, TransactionRecord, TxCode};
