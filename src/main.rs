//! Rust Teller Engine CLI
//!
//! Command-line interface for running interactive teller sessions over
//! fixed-width account files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.txt aux.txt transactions.txt
//! ```
//!
//! The program loads the current accounts file, runs the interactive menu
//! over stdin/stdout, and writes the accounts file back on exit. Every
//! logout overwrites the daily transaction file with the session's
//! records. The auxiliary path is accepted for interface compatibility
//! and never read.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (accounts file unreadable, final save failed, etc.)

use rust_teller_engine::cli;
use rust_teller_engine::core::{AccountStore, TellerService};
use rust_teller_engine::front::ConsoleFrontEnd;
use rust_teller_engine::io::{FileAccountStore, TransactionLog};
use std::io;
use std::process;

fn main() {
    // Initialize tracing; events go to stderr, the menu owns stdout
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    // Load account data from persistent storage
    let mut store = FileAccountStore::new(&args.accounts_file);
    if let Err(e) = store.load() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Wire the rule engine and run the interactive session
    let log = TransactionLog::new(&args.transactions_file);
    let service = TellerService::new(store, log);
    let mut front = ConsoleFrontEnd::new(io::stdin().lock(), io::stdout(), service);
    if let Err(e) = front.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Persist account data before exiting
    let service = front.into_service();
    if let Err(e) = service.store().save() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
