use clap::Parser;
use std::path::PathBuf;

/// Run the interactive teller over fixed-format account data
#[derive(Parser, Debug)]
#[command(name = "teller-engine")]
#[command(about = "Interactive teller over fixed-format account data", long_about = None)]
pub struct CliArgs {
    /// Accounts file read at startup and rewritten at shutdown
    #[arg(value_name = "ACCOUNTS", help = "Path to the current accounts file")]
    pub accounts_file: PathBuf,

    /// Auxiliary input kept for interface compatibility; never read
    #[arg(value_name = "AUX", help = "Auxiliary input path (accepted but unused)")]
    pub aux_file: PathBuf,

    /// Daily transaction file overwritten at each logout
    #[arg(
        value_name = "TRANSACTIONS",
        help = "Path to the daily transaction output file"
    )]
    pub transactions_file: PathBuf,
}
