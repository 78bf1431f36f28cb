//! I/O module
//!
//! Handles fixed-width encoding and file persistence.
//!
//! # Components
//!
//! - `fixed_format` - Fixed-width field and line codecs (pure functions)
//! - `accounts_file` - File-backed account store
//! - `tx_log` - Session-scoped transaction log with write-and-clear flush

pub mod accounts_file;
pub mod fixed_format;
pub mod tx_log;

pub use accounts_file::FileAccountStore;
pub use tx_log::TransactionLog;
