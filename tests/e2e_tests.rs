//! End-to-end integration tests
//!
//! These tests validate the complete session pipeline through the public
//! crate surface. Each test:
//! 1. Seeds an accounts file (or starts without one) in a temp directory
//! 2. Loads it into a file-backed store
//! 3. Drives the console front end with a scripted input stream
//! 4. Saves the store back, shutdown-style
//! 5. Asserts on the console output and the exact bytes of the accounts
//!    and transaction files
//!
//! Scenarios cover account lifecycle, session limits, deferred deposits,
//! company-code validation, and the fixed-width file contracts.

#[cfg(test)]
mod tests {
    use rust_teller_engine::core::{AccountStore, TellerService};
    use rust_teller_engine::front::ConsoleFrontEnd;
    use rust_teller_engine::io::{FileAccountStore, TransactionLog};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ACCOUNTS_SENTINEL: &str = "00000 END_OF_FILE          A 00000.00";
    const TX_SENTINEL: &str = "00                      00000 00000.00  ";

    /// Run one scripted console session over an accounts file in `dir`
    ///
    /// Loads the accounts file (a missing file loads empty), runs the
    /// front end over the scripted input until it is exhausted, saves the
    /// store the way shutdown does, and returns the captured console
    /// output. The transaction log lands in `transactions.txt` beside the
    /// accounts file.
    ///
    /// # Panics
    ///
    /// Panics if the load, the session, or the save fails.
    fn run_session(dir: &TempDir, seeded_accounts: Option<&str>, script: &str) -> String {
        let accounts_path = dir.path().join("accounts.txt");
        if let Some(content) = seeded_accounts {
            fs::write(&accounts_path, content).expect("Failed to seed accounts file");
        }

        let mut store = FileAccountStore::new(&accounts_path);
        store.load().expect("Failed to load accounts file");
        let log = TransactionLog::new(&dir.path().join("transactions.txt"));

        let mut output = Vec::new();
        let mut front =
            ConsoleFrontEnd::new(script.as_bytes(), &mut output, TellerService::new(store, log));
        front.run().expect("Console session failed");
        front
            .into_service()
            .store()
            .save()
            .expect("Failed to save accounts file");

        String::from_utf8(output).expect("Console output was not UTF-8")
    }

    fn accounts_path(dir: &TempDir) -> PathBuf {
        dir.path().join("accounts.txt")
    }

    fn transactions_path(dir: &TempDir) -> PathBuf {
        dir.path().join("transactions.txt")
    }

    /// Admin creates an account, then its holder deposits and withdraws.
    /// The deposit lands only at logout, and the transaction file holds
    /// the standard session's records in order, each exactly 40 chars.
    #[test]
    fn test_create_deposit_withdraw_lifecycle() {
        let dir = TempDir::new().unwrap();
        let script = "1\nadmin\n6\nAlice\n100.00\n0\n\
                      1\nstandard\nAlice\n5\n00001\n50.00\n2\n00001\n30.00\n0\n";

        let output = run_session(&dir, None, script);

        assert!(output.contains("Create recorded. New account 00001."));
        assert!(output.contains("Deposit recorded (not available until logout)."));
        assert!(output.contains("Withdrawal recorded."));

        // Second logout overwrote the file with the standard session only
        let written = fs::read_to_string(transactions_path(&dir)).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(
            lines,
            vec![
                "04 Alice                00001 00050.00  ",
                "01 Alice                00001 00030.00  ",
                TX_SENTINEL,
            ]
        );
        for line in &lines {
            assert_eq!(line.chars().count(), 40);
        }

        // 100.00 - 30.00 + 50.00 applied at logout
        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert_eq!(
            accounts.lines().collect::<Vec<_>>(),
            vec!["00001 Alice                A 00120.00", ACCOUNTS_SENTINEL]
        );
    }

    /// A quiet run reproduces the seeded accounts file byte for byte
    #[test]
    fn test_accounts_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let seeded = "00001 Alice                A 00100.00\n\
                      00002 Bob                  D 00050.25\n\
                      00000 END_OF_FILE          A 00000.00\n";

        run_session(&dir, Some(seeded), "");

        let saved = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert_eq!(saved, seeded);
    }

    /// Withdrawals cap at $500 per standard session; the rejected attempt
    /// leaves no trace in the balance or the transaction file
    #[test]
    fn test_session_withdrawal_limit() {
        let dir = TempDir::new().unwrap();
        let seeded = "00001 Alice                A 02000.00\n\
                      00000 END_OF_FILE          A 00000.00\n";
        let script = "1\nstandard\nAlice\n2\n00001\n400.00\n2\n00001\n200.00\n2\n00001\n100.00\n0\n";

        let output = run_session(&dir, Some(seeded), script);

        assert!(output.contains("Error: Standard session withdrawal limit is $500.00"));

        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert!(accounts.starts_with("00001 Alice                A 01500.00"));

        let written = fs::read_to_string(transactions_path(&dir)).unwrap();
        let codes: Vec<&str> = written.lines().map(|line| &line[..2]).collect();
        assert_eq!(codes, vec!["01", "01", "00"]);
    }

    /// Deposited funds are not spendable within the same session
    #[test]
    fn test_deposit_unavailable_until_logout() {
        let dir = TempDir::new().unwrap();
        let seeded = "00001 Alice                A 00010.00\n\
                      00000 END_OF_FILE          A 00000.00\n";
        let script = "1\nstandard\nAlice\n5\n00001\n100.00\n2\n00001\n50.00\n0\n";

        let output = run_session(&dir, Some(seeded), script);

        assert!(output
            .contains("Error: Insufficient funds for account 00001: available 10.00, requested 50.00"));

        // The deposit itself landed at logout
        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert!(accounts.starts_with("00001 Alice                A 00110.00"));
    }

    /// An unknown company code fails before the account is even looked at
    #[test]
    fn test_unknown_company_code_rejected() {
        let dir = TempDir::new().unwrap();
        let script = "1\nstandard\nAlice\n4\n00099\nxyz\n25.00\n0\n";

        let output = run_session(&dir, None, script);

        assert!(output.contains("Error: Invalid company code 'xyz' (expected EC, CQ, or FI)"));

        // Nothing but the terminal record was written
        let written = fs::read_to_string(transactions_path(&dir)).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), vec![TX_SENTINEL]);
    }

    /// Full admin lifecycle: create, disable, changeplan, create, delete
    #[test]
    fn test_admin_lifecycle_session() {
        let dir = TempDir::new().unwrap();
        let script = "1\nadmin\n\
                      6\nCarol\n500.00\n\
                      8\nCarol\n00001\n\
                      9\nCarol\n00001\n\
                      6\nDave\n10.00\n\
                      7\nDave\n00002\n\
                      0\n";

        let output = run_session(&dir, None, script);

        assert!(output.contains("Create recorded. New account 00001."));
        assert!(output.contains("Disable recorded."));
        assert!(output.contains("Changeplan recorded."));
        assert!(output.contains("Create recorded. New account 00002."));
        assert!(output.contains("Delete recorded."));

        let written = fs::read_to_string(transactions_path(&dir)).unwrap();
        assert_eq!(
            written.lines().collect::<Vec<_>>(),
            vec![
                "05 Carol                00001 00500.00  ",
                "07 Carol                00001 00000.00  ",
                "08 Carol                00001 00000.00NP",
                "05 Dave                 00002 00010.00  ",
                "06 Dave                 00002 00000.00  ",
                TX_SENTINEL,
            ]
        );

        // Dave is gone; Carol survives disabled
        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert_eq!(
            accounts.lines().collect::<Vec<_>>(),
            vec!["00001 Carol                D 00500.00", ACCOUNTS_SENTINEL]
        );
    }

    /// A missing accounts file starts empty, and a session that never
    /// logs out flushes nothing
    #[test]
    fn test_missing_accounts_file_and_unflushed_session() {
        let dir = TempDir::new().unwrap();
        let script = "1\nstandard\nAlice\n2\n00001\n5.00\n";

        let output = run_session(&dir, None, script);

        assert!(output.contains("Error: Account 00001 not found"));
        assert!(!transactions_path(&dir).exists());

        // Shutdown still writes a well-formed accounts file
        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert_eq!(accounts.lines().collect::<Vec<_>>(), vec![ACCOUNTS_SENTINEL]);
    }

    /// Transfers move funds between holders within the session
    #[test]
    fn test_transfer_between_accounts() {
        let dir = TempDir::new().unwrap();
        let seeded = "00001 Alice                A 00100.00\n\
                      00002 Bob                  A 00050.00\n\
                      00000 END_OF_FILE          A 00000.00\n";
        let script = "1\nstandard\nAlice\n3\n00001\n00002\n25.50\n0\n";

        let output = run_session(&dir, Some(seeded), script);

        assert!(output.contains("Transfer recorded."));

        let accounts = fs::read_to_string(accounts_path(&dir)).unwrap();
        assert_eq!(
            accounts.lines().collect::<Vec<_>>(),
            vec![
                "00001 Alice                A 00074.50",
                "00002 Bob                  A 00075.50",
                ACCOUNTS_SENTINEL,
            ]
        );

        let written = fs::read_to_string(transactions_path(&dir)).unwrap();
        assert_eq!(
            written.lines().next().unwrap(),
            "02 Alice                00001 00025.50  "
        );
    }
}
