//! Interactive console front end
//!
//! This module provides the menu loop that drives the rule engine from
//! a line-oriented input stream. It owns no business logic: every rule
//! lives in the service, and the front end only prompts, dispatches, and
//! prints confirmations or error messages.
//!
//! The loop is generic over its reader and writer so the whole surface
//! can be exercised in tests with scripted input and a captured output
//! buffer.

use crate::core::service::TellerService;
use crate::core::traits::AccountStore;
use crate::types::Session;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

/// Menu option selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Login,
    Withdrawal,
    Transfer,
    Paybill,
    Deposit,
    Create,
    Delete,
    Disable,
    Changeplan,
    Logout,
}

impl MenuChoice {
    /// Map a typed menu line to a choice, or `None` for anything else
    fn parse(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(MenuChoice::Login),
            "2" => Some(MenuChoice::Withdrawal),
            "3" => Some(MenuChoice::Transfer),
            "4" => Some(MenuChoice::Paybill),
            "5" => Some(MenuChoice::Deposit),
            "6" => Some(MenuChoice::Create),
            "7" => Some(MenuChoice::Delete),
            "8" => Some(MenuChoice::Disable),
            "9" => Some(MenuChoice::Changeplan),
            "0" => Some(MenuChoice::Logout),
            _ => None,
        }
    }
}

/// Menu-driven console session over a reader and a writer
///
/// Owns the rule engine and the session for the lifetime of the loop.
/// Input is read one trimmed line at a time; end of input terminates
/// the loop cleanly, including mid-prompt.
pub struct ConsoleFrontEnd<R, W, S>
where
    R: BufRead,
    W: Write,
    S: AccountStore,
{
    input: R,
    output: W,
    service: TellerService<S>,
    session: Session,
}

impl<R, W, S> ConsoleFrontEnd<R, W, S>
where
    R: BufRead,
    W: Write,
    S: AccountStore,
{
    /// Create a front end over an input stream, an output stream, and a
    /// rule engine; the session starts logged out
    pub fn new(input: R, output: W, service: TellerService<S>) -> Self {
        ConsoleFrontEnd {
            input,
            output,
            service,
            session: Session::new(),
        }
    }

    /// Consume the front end and hand back the rule engine
    ///
    /// Used at shutdown to reach the account store for the final save.
    pub fn into_service(self) -> TellerService<S> {
        self.service
    }

    /// Run the menu loop until end of input
    ///
    /// # Errors
    ///
    /// Returns an error only when reading the input stream or writing
    /// the output stream fails; rule violations are printed and the
    /// loop continues.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "Teller Front End")?;

        loop {
            self.show_menu()?;
            let Some(line) = self.prompt("Choice: ")? else {
                break;
            };
            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Invalid choice.")?;
                continue;
            };

            // Nothing but login is available while logged out
            if !self.session.is_logged_in() {
                match choice {
                    MenuChoice::Login => {
                        if !self.login_flow()? {
                            break;
                        }
                    }
                    _ => writeln!(self.output, "Please login first.")?,
                }
                continue;
            }

            let keep_going = match choice {
                MenuChoice::Login => {
                    writeln!(self.output, "Already logged in. Logout first.")?;
                    true
                }
                MenuChoice::Withdrawal => self.withdrawal_flow()?,
                MenuChoice::Transfer => self.transfer_flow()?,
                MenuChoice::Paybill => self.paybill_flow()?,
                MenuChoice::Deposit => self.deposit_flow()?,
                MenuChoice::Create => self.create_flow()?,
                MenuChoice::Delete => self.delete_flow()?,
                MenuChoice::Disable => self.disable_flow()?,
                MenuChoice::Changeplan => self.changeplan_flow()?,
                MenuChoice::Logout => self.logout_flow()?,
            };
            if !keep_going {
                break;
            }
        }

        self.output.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Select a transaction:")?;
        writeln!(self.output, "1 - login")?;
        writeln!(self.output, "2 - withdrawal")?;
        writeln!(self.output, "3 - transfer")?;
        writeln!(self.output, "4 - paybill")?;
        writeln!(self.output, "5 - deposit")?;
        writeln!(self.output, "6 - create (admin)")?;
        writeln!(self.output, "7 - delete (admin)")?;
        writeln!(self.output, "8 - disable (admin)")?;
        writeln!(self.output, "9 - changeplan (admin)")?;
        writeln!(self.output, "0 - logout")?;
        Ok(())
    }

    /// Print a prompt and read one trimmed line; `None` means the input
    /// stream ended
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt for an amount; the inner `None` marks a line that did not
    /// parse as a number, the outer `None` marks end of input
    fn prompt_amount(&mut self, message: &str) -> io::Result<Option<Option<Decimal>>> {
        match self.prompt(message)? {
            Some(line) => Ok(Some(line.parse::<Decimal>().ok())),
            None => Ok(None),
        }
    }

    /// Admin sessions supply the holder name to record in the log;
    /// standard sessions record their own name, so no prompt is shown
    fn admin_holder_prompt(&mut self) -> io::Result<Option<String>> {
        if !self.session.is_admin() {
            return Ok(Some(String::new()));
        }
        self.prompt("Account holder name: ")
    }

    fn login_flow(&mut self) -> io::Result<bool> {
        let Some(kind) = self.prompt("Session type (standard/admin): ")? else {
            return Ok(false);
        };

        match kind.to_lowercase().as_str() {
            "admin" => {
                self.session.login_admin();
                writeln!(self.output, "Admin login accepted.")?;
            }
            "standard" => {
                let Some(name) = self.prompt("Account holder name: ")? else {
                    return Ok(false);
                };
                self.session.login_standard(&name);
                writeln!(self.output, "Standard login accepted.")?;
            }
            _ => writeln!(self.output, "Invalid session type.")?,
        }
        Ok(true)
    }

    fn logout_flow(&mut self) -> io::Result<bool> {
        // Deposits land now, so they were not spendable during the session
        self.service.apply_pending_deposits();
        let flushed = self.service.write_transactions_at_logout();
        self.session.logout();

        match flushed {
            Ok(()) => writeln!(self.output, "Logged out. Transactions written.")?,
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                writeln!(self.output, "Logged out.")?;
            }
        }
        Ok(true)
    }

    fn withdrawal_flow(&mut self) -> io::Result<bool> {
        let Some(admin_name) = self.admin_holder_prompt()? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };
        let Some(parsed) = self.prompt_amount("Amount to withdraw: ")? else {
            return Ok(false);
        };
        let Some(amount) = parsed else {
            writeln!(self.output, "Bad amount.")?;
            return Ok(true);
        };

        match self
            .service
            .withdrawal(&mut self.session, Some(&admin_name), &account, amount)
        {
            Ok(()) => writeln!(self.output, "Withdrawal recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn transfer_flow(&mut self) -> io::Result<bool> {
        let Some(admin_name) = self.admin_holder_prompt()? else {
            return Ok(false);
        };
        let Some(from) = self.prompt("From account number: ")? else {
            return Ok(false);
        };
        let Some(to) = self.prompt("To account number: ")? else {
            return Ok(false);
        };
        let Some(parsed) = self.prompt_amount("Amount to transfer: ")? else {
            return Ok(false);
        };
        let Some(amount) = parsed else {
            writeln!(self.output, "Bad amount.")?;
            return Ok(true);
        };

        match self
            .service
            .transfer(&mut self.session, Some(&admin_name), &from, &to, amount)
        {
            Ok(()) => writeln!(self.output, "Transfer recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn paybill_flow(&mut self) -> io::Result<bool> {
        let Some(admin_name) = self.admin_holder_prompt()? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };
        let Some(company) = self.prompt("Company (EC/CQ/FI): ")? else {
            return Ok(false);
        };
        let Some(parsed) = self.prompt_amount("Amount to pay: ")? else {
            return Ok(false);
        };
        let Some(amount) = parsed else {
            writeln!(self.output, "Bad amount.")?;
            return Ok(true);
        };

        match self.service.paybill(
            &mut self.session,
            Some(&admin_name),
            &account,
            &company,
            amount,
        ) {
            Ok(()) => writeln!(self.output, "Paybill recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn deposit_flow(&mut self) -> io::Result<bool> {
        let Some(admin_name) = self.admin_holder_prompt()? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };
        let Some(parsed) = self.prompt_amount("Amount to deposit: ")? else {
            return Ok(false);
        };
        let Some(amount) = parsed else {
            writeln!(self.output, "Bad amount.")?;
            return Ok(true);
        };

        match self
            .service
            .deposit(&self.session, Some(&admin_name), &account, amount)
        {
            Ok(()) => writeln!(self.output, "Deposit recorded (not available until logout).")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn create_flow(&mut self) -> io::Result<bool> {
        if !self.session.is_admin() {
            writeln!(self.output, "Admin only.")?;
            return Ok(true);
        }

        let Some(name) = self.prompt("Account holder name: ")? else {
            return Ok(false);
        };
        let Some(parsed) = self.prompt_amount("Initial balance: ")? else {
            return Ok(false);
        };
        let Some(balance) = parsed else {
            writeln!(self.output, "Bad amount.")?;
            return Ok(true);
        };

        match self.service.create(&self.session, &name, balance) {
            Ok(id) => writeln!(self.output, "Create recorded. New account {id}.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn delete_flow(&mut self) -> io::Result<bool> {
        if !self.session.is_admin() {
            writeln!(self.output, "Admin only.")?;
            return Ok(true);
        }

        let Some(name) = self.prompt("Account holder name: ")? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };

        match self.service.delete(&self.session, &name, &account) {
            Ok(()) => writeln!(self.output, "Delete recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn disable_flow(&mut self) -> io::Result<bool> {
        if !self.session.is_admin() {
            writeln!(self.output, "Admin only.")?;
            return Ok(true);
        }

        let Some(name) = self.prompt("Account holder name: ")? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };

        match self.service.disable(&self.session, &name, &account) {
            Ok(()) => writeln!(self.output, "Disable recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }

    fn changeplan_flow(&mut self) -> io::Result<bool> {
        if !self.session.is_admin() {
            writeln!(self.output, "Admin only.")?;
            return Ok(true);
        }

        let Some(name) = self.prompt("Account holder name: ")? else {
            return Ok(false);
        };
        let Some(account) = self.prompt("Account number: ")? else {
            return Ok(false);
        };

        match self.service.changeplan(&self.session, &name, &account) {
            Ok(()) => writeln!(self.output, "Changeplan recorded.")?,
            Err(e) => writeln!(self.output, "Error: {e}")?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::accounts_file::FileAccountStore;
    use crate::io::tx_log::TransactionLog;
    use crate::types::{Account, TxCode};
    use std::path::Path;
    use tempfile::TempDir;

    fn account(id: &str, name: &str, cents: i64) -> Account {
        Account::new(id.to_string(), name.to_string(), Decimal::new(cents, 2))
    }

    /// Run a scripted session; the transaction log lands in `dir`
    fn run_script(
        dir: &TempDir,
        accounts: Vec<Account>,
        script: &str,
    ) -> (TellerService<FileAccountStore>, String) {
        let mut store = FileAccountStore::new(Path::new("unused-accounts.txt"));
        for account in accounts {
            store.add(account);
        }
        let log = TransactionLog::new(&dir.path().join("transactions.txt"));

        let mut output = Vec::new();
        let mut front =
            ConsoleFrontEnd::new(script.as_bytes(), &mut output, TellerService::new(store, log));
        front.run().unwrap();
        let service = front.into_service();

        (service, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_operations_demand_login_first() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "2\n");

        assert!(output.contains("Please login first."));
    }

    #[test]
    fn test_unknown_choice_is_reported() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "x\n");

        assert!(output.contains("Invalid choice."));
    }

    #[test]
    fn test_invalid_session_type_is_reported() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "1\nguest\n");

        assert!(output.contains("Invalid session type."));
    }

    #[test]
    fn test_standard_login_and_logout() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "1\nstandard\nAlice\n0\n");

        assert!(output.contains("Standard login accepted."));
        assert!(output.contains("Logged out. Transactions written."));
        // Empty session still writes the terminal record
        let written = std::fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
        assert!(written.starts_with("00 "));
    }

    #[test]
    fn test_second_login_rejected() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "1\nadmin\n1\n");

        assert!(output.contains("Admin login accepted."));
        assert!(output.contains("Already logged in. Logout first."));
    }

    #[test]
    fn test_withdrawal_flow_debits_account() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00001", "Alice", 10000)];
        let (service, output) =
            run_script(&dir, accounts, "1\nstandard\nAlice\n2\n00001\n30\n");

        assert!(output.contains("Withdrawal recorded."));
        assert_eq!(
            service.store().get("00001").unwrap().balance,
            Decimal::new(7000, 2)
        );
    }

    #[test]
    fn test_rule_violation_prints_error_and_continues() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(
            &dir,
            vec![],
            "1\nstandard\nAlice\n2\n00099\n30\n0\n",
        );

        assert!(output.contains("Error: Account 00099 not found"));
        // The session survived the failure
        assert!(output.contains("Logged out. Transactions written."));
    }

    #[test]
    fn test_unparsable_amount_is_rejected_locally() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00001", "Alice", 10000)];
        let (service, output) =
            run_script(&dir, accounts, "1\nstandard\nAlice\n2\n00001\nabc\n");

        assert!(output.contains("Bad amount."));
        assert_eq!(
            service.store().get("00001").unwrap().balance,
            Decimal::new(10000, 2)
        );
        assert!(service.log().is_empty());
    }

    #[test]
    fn test_admin_gate_in_menu() {
        let dir = TempDir::new().unwrap();
        let (_, output) = run_script(&dir, vec![], "1\nstandard\nAlice\n6\n");

        assert!(output.contains("Admin only."));
    }

    #[test]
    fn test_admin_flow_records_supplied_holder() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00002", "Bob", 10000)];
        let (service, output) =
            run_script(&dir, accounts, "1\nadmin\n2\nBob\n00002\n50\n");

        assert!(output.contains("Withdrawal recorded."));
        let records = service.log().records();
        assert_eq!(records[0].holder, "Bob");
    }

    #[test]
    fn test_create_flow_prints_new_identifier() {
        let dir = TempDir::new().unwrap();
        let (service, output) = run_script(&dir, vec![], "1\nadmin\n6\nAlice\n100.00\n");

        assert!(output.contains("Create recorded. New account 00001."));
        assert!(service.store().exists("00001"));
    }

    #[test]
    fn test_deposit_flow_defers_and_logout_applies() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00001", "Alice", 10000)];
        let (service, output) =
            run_script(&dir, accounts, "1\nstandard\nAlice\n5\n00001\n50\n0\n");

        assert!(output.contains("Deposit recorded (not available until logout)."));
        assert_eq!(
            service.store().get("00001").unwrap().balance,
            Decimal::new(15000, 2)
        );
        let written = std::fs::read_to_string(dir.path().join("transactions.txt")).unwrap();
        assert!(written.lines().next().unwrap().starts_with(TxCode::Deposit.as_str()));
    }

    #[test]
    fn test_huge_deposit_rejected_and_session_continues() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00001", "Alice", 10000)];
        // The largest representable amount parses fine; the projected
        // logout balance does not
        let (service, output) = run_script(
            &dir,
            accounts,
            "1\nstandard\nAlice\n5\n00001\n79228162514264337593543950335\n0\n",
        );

        assert!(output.contains("Error: Arithmetic overflow in deposit for account 00001"));
        assert!(output.contains("Logged out. Transactions written."));
        assert_eq!(
            service.store().get("00001").unwrap().balance,
            Decimal::new(10000, 2)
        );
    }

    #[test]
    fn test_eof_mid_flow_terminates_cleanly() {
        let dir = TempDir::new().unwrap();
        let accounts = vec![account("00001", "Alice", 10000)];
        // Input ends right after the withdrawal choice
        let (service, _) = run_script(&dir, accounts, "1\nstandard\nAlice\n2\n");

        assert_eq!(
            service.store().get("00001").unwrap().balance,
            Decimal::new(10000, 2)
        );
    }
}
