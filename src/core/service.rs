//! Session operation rule engine
//!
//! This module provides the TellerService that orchestrates every
//! state-changing operation by coordinating the account store, the
//! session, the pending-deposit ledger, and the transaction log.
//!
//! The service enforces business rules such as:
//! - Amount sign and parameter checks before any account lookup
//! - Existence, standing, and ownership checks before any mutation
//! - Cumulative per-session spending limits for standard sessions
//! - Admin privilege checks ahead of all other validation
//!
//! Every operation is all-or-nothing: a validation failure leaves the
//! store, the session totals, and the log buffer exactly as they were.

use crate::core::traits::AccountStore;
use crate::io::fixed_format;
use crate::io::tx_log::TransactionLog;
use crate::types::{
    Account, AccountId, AccountPlan, AccountStatus, CompanyCode, Session, SpendingKind,
    TellerError, TransactionRecord, TxCode,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Upper bound on the initial balance accepted at account creation ($99999.99)
pub const MAX_INITIAL_BALANCE: Decimal = Decimal::from_parts(9999999, 0, 0, false, 2);

/// Holder name to record for an operation
///
/// Standard sessions log their own holder name; admin sessions log the
/// name the admin supplied for the operation.
fn log_holder<'a>(session: &'a Session, admin_name: Option<&'a str>) -> &'a str {
    session.holder_name().or(admin_name).unwrap_or("")
}

/// Case-insensitive holder-name comparison after trimming
fn names_match(stored: &str, supplied: &str) -> bool {
    stored.trim().to_lowercase() == supplied.trim().to_lowercase()
}

/// Rule engine for session operations
///
/// Owns the account store, the transaction log buffer, and the
/// pending-deposit ledger. The active session is threaded through every
/// call rather than held by the service.
pub struct TellerService<S: AccountStore> {
    store: S,
    log: TransactionLog,
    /// Deposits recorded this session, keyed by canonical identifier,
    /// applied to balances at logout
    pending_deposits: HashMap<AccountId, Decimal>,
}

impl<S: AccountStore> TellerService<S> {
    /// Create a service over a store and a transaction log
    pub fn new(store: S, log: TransactionLog) -> Self {
        TellerService {
            store,
            log,
            pending_deposits: HashMap::new(),
        }
    }

    /// Borrow the underlying account store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Borrow the transaction log buffer
    pub fn log(&self) -> &TransactionLog {
        &self.log
    }

    /// Withdraw funds from an account
    ///
    /// Validation order: amount sign, identifier normalization, account
    /// existence, standing, ownership (standard sessions), cumulative
    /// withdrawal limit (standard sessions). On success the account is
    /// debited, the session total updated, and a "01" record logged.
    ///
    /// # Arguments
    ///
    /// * `session` - The active session
    /// * `admin_name` - Holder name to record when the session is admin
    /// * `account_id` - Target account, any spelling
    /// * `amount` - Amount to withdraw
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is negative
    /// - The account does not exist, is disabled, or is not held by a
    ///   standard session's holder
    /// - The session's cumulative withdrawal total would exceed $500.00
    /// - The balance is insufficient
    pub fn withdrawal(
        &mut self,
        session: &mut Session,
        admin_name: Option<&str>,
        account_id: &str,
        amount: Decimal,
    ) -> Result<(), TellerError> {
        self.check_amount(amount)?;
        let id = fixed_format::account_field(account_id);
        self.validate_account_access(session, &id)?;
        if !session.is_admin() {
            session.check_limit(SpendingKind::Withdrawal, amount)?;
        }

        self.store.get_mut(&id)?.debit(amount)?;
        if !session.is_admin() {
            session.record_spent(SpendingKind::Withdrawal, amount);
        }

        let holder = log_holder(session, admin_name);
        self.log
            .add(TransactionRecord::new(TxCode::Withdrawal, holder, &id, amount));
        debug!(account = %id, %amount, "Withdrawal applied");
        Ok(())
    }

    /// Transfer funds between two accounts
    ///
    /// The destination's existence is checked before the source account
    /// is validated. The destination must also be active. On success the
    /// source is debited, the destination credited, the session transfer
    /// total updated, and a "02" record logged from the source side.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is negative
    /// - The destination does not exist or is disabled
    /// - The source does not exist, is disabled, or is not held by a
    ///   standard session's holder
    /// - The session's cumulative transfer total would exceed $1000.00
    /// - Crediting the destination would overflow its balance
    /// - The source balance is insufficient
    pub fn transfer(
        &mut self,
        session: &mut Session,
        admin_name: Option<&str>,
        from_id: &str,
        to_id: &str,
        amount: Decimal,
    ) -> Result<(), TellerError> {
        self.check_amount(amount)?;
        let from = fixed_format::account_field(from_id);
        let to = fixed_format::account_field(to_id);

        // Destination existence comes before source validation
        if !self.store.exists(&to) {
            return Err(TellerError::destination_not_found(&to));
        }
        self.validate_account_access(session, &from)?;
        if self.store.get(&to)?.status == AccountStatus::Disabled {
            return Err(TellerError::account_disabled(&to));
        }
        if !session.is_admin() {
            session.check_limit(SpendingKind::Transfer, amount)?;
        }

        // The destination must be able to absorb the credit, together
        // with any deposits still pending against it
        let absorbed = self
            .store
            .get(&to)?
            .balance
            .checked_add(amount)
            .and_then(|balance| balance.checked_add(self.pending_total(&to)));
        if absorbed.is_none() {
            return Err(TellerError::arithmetic_overflow("transfer", &to));
        }

        self.store.get_mut(&from)?.debit(amount)?;
        self.store.get_mut(&to)?.credit(amount)?;
        if !session.is_admin() {
            session.record_spent(SpendingKind::Transfer, amount);
        }

        let holder = log_holder(session, admin_name);
        self.log
            .add(TransactionRecord::new(TxCode::Transfer, holder, &from, amount));
        debug!(from = %from, to = %to, %amount, "Transfer applied");
        Ok(())
    }

    /// Pay a bill to a registered company
    ///
    /// The company code is checked before the account is validated, so an
    /// unknown code fails no matter what account was named. On success
    /// the account is debited, the session bill payment total updated,
    /// and a "03" record logged with the company code in its misc field.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is negative
    /// - The company code is not EC, CQ, or FI (case-insensitive)
    /// - The account does not exist, is disabled, or is not held by a
    ///   standard session's holder
    /// - The session's cumulative bill payment total would exceed $2000.00
    /// - The balance is insufficient
    pub fn paybill(
        &mut self,
        session: &mut Session,
        admin_name: Option<&str>,
        account_id: &str,
        company_code: &str,
        amount: Decimal,
    ) -> Result<(), TellerError> {
        self.check_amount(amount)?;
        let id = fixed_format::account_field(account_id);

        // Company code comes before account validation
        let company = CompanyCode::parse(company_code)
            .ok_or_else(|| TellerError::invalid_company_code(company_code.trim()))?;

        self.validate_account_access(session, &id)?;
        if !session.is_admin() {
            session.check_limit(SpendingKind::Paybill, amount)?;
        }

        self.store.get_mut(&id)?.debit(amount)?;
        if !session.is_admin() {
            session.record_spent(SpendingKind::Paybill, amount);
        }

        let holder = log_holder(session, admin_name);
        self.log.add(TransactionRecord::with_misc(
            TxCode::Paybill,
            holder,
            &id,
            amount,
            company.as_str(),
        ));
        debug!(account = %id, company = company.as_str(), %amount, "Bill payment applied");
        Ok(())
    }

    /// Record a deposit, deferred until logout
    ///
    /// Validated like a withdrawal but with no limit check. The balance
    /// is not touched: the amount accumulates in the pending-deposit
    /// ledger and is credited by `apply_pending_deposits`. The balance
    /// the account would reach at logout must stay representable, so an
    /// oversized deposit is rejected here rather than at apply time. A
    /// "04" record is logged immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The amount is negative
    /// - The account does not exist, is disabled, or is not held by a
    ///   standard session's holder
    /// - The accumulated pending amount, or the balance it would produce
    ///   at logout, would overflow
    pub fn deposit(
        &mut self,
        session: &Session,
        admin_name: Option<&str>,
        account_id: &str,
        amount: Decimal,
    ) -> Result<(), TellerError> {
        self.check_amount(amount)?;
        let id = fixed_format::account_field(account_id);
        self.validate_account_access(session, &id)?;

        let new_pending = self
            .pending_total(&id)
            .checked_add(amount)
            .ok_or_else(|| TellerError::arithmetic_overflow("deposit", &id))?;
        if self.store.get(&id)?.balance.checked_add(new_pending).is_none() {
            return Err(TellerError::arithmetic_overflow("deposit", &id));
        }
        self.pending_deposits.insert(id.clone(), new_pending);

        let holder = log_holder(session, admin_name);
        self.log
            .add(TransactionRecord::new(TxCode::Deposit, holder, &id, amount));
        debug!(account = %id, %amount, "Deposit recorded for logout");
        Ok(())
    }

    /// Create a new account (admin only)
    ///
    /// The privilege check precedes all other validation. The identifier
    /// is generated by the store; the account starts active on the
    /// standard plan. A "05" record carrying the initial balance is
    /// logged.
    ///
    /// # Returns
    ///
    /// The canonical identifier of the new account.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session is not an admin session
    /// - The trimmed holder name exceeds 20 characters
    /// - The initial balance is outside 0.00..=99999.99
    pub fn create(
        &mut self,
        session: &Session,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, TellerError> {
        self.require_admin(session, "create")?;

        let name = name.trim();
        if name.chars().count() > 20 {
            return Err(TellerError::name_too_long(name));
        }
        if initial_balance < Decimal::ZERO || initial_balance > MAX_INITIAL_BALANCE {
            return Err(TellerError::invalid_initial_balance(initial_balance));
        }

        let id = self.store.next_account_id();
        self.store
            .add(Account::new(id.clone(), name.to_string(), initial_balance));
        self.log
            .add(TransactionRecord::new(TxCode::Create, name, &id, initial_balance));
        info!(account = %id, "Created account");
        Ok(id)
    }

    /// Delete an account (admin only)
    ///
    /// Requires the supplied holder name to match the account's stored
    /// name, case-insensitive after trimming. Disabled accounts can be
    /// deleted. A "06" record with a zero amount is logged, carrying the
    /// supplied name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session is not an admin session
    /// - The account does not exist
    /// - The supplied holder name does not match
    pub fn delete(
        &mut self,
        session: &Session,
        holder_name: &str,
        account_id: &str,
    ) -> Result<(), TellerError> {
        self.require_admin(session, "delete")?;
        let id = fixed_format::account_field(account_id);
        self.check_holder_match(&id, holder_name)?;

        self.store.remove(&id);
        self.log.add(TransactionRecord::new(
            TxCode::Delete,
            holder_name,
            &id,
            Decimal::ZERO,
        ));
        info!(account = %id, "Deleted account");
        Ok(())
    }

    /// Disable an account (admin only)
    ///
    /// Same name-match requirement as delete; disabling an already
    /// disabled account succeeds. A "07" record with a zero amount is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session is not an admin session
    /// - The account does not exist
    /// - The supplied holder name does not match
    pub fn disable(
        &mut self,
        session: &Session,
        holder_name: &str,
        account_id: &str,
    ) -> Result<(), TellerError> {
        self.require_admin(session, "disable")?;
        let id = fixed_format::account_field(account_id);
        self.check_holder_match(&id, holder_name)?;

        self.store.get_mut(&id)?.status = AccountStatus::Disabled;
        self.log.add(TransactionRecord::new(
            TxCode::Disable,
            holder_name,
            &id,
            Decimal::ZERO,
        ));
        info!(account = %id, "Disabled account");
        Ok(())
    }

    /// Switch an account to the new plan (admin only)
    ///
    /// Same name-match requirement as delete; the prior plan value is not
    /// checked. A "08" record with a zero amount and misc field "NP" is
    /// logged.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The session is not an admin session
    /// - The account does not exist
    /// - The supplied holder name does not match
    pub fn changeplan(
        &mut self,
        session: &Session,
        holder_name: &str,
        account_id: &str,
    ) -> Result<(), TellerError> {
        self.require_admin(session, "changeplan")?;
        let id = fixed_format::account_field(account_id);
        self.check_holder_match(&id, holder_name)?;

        self.store.get_mut(&id)?.plan = AccountPlan::New;
        self.log.add(TransactionRecord::with_misc(
            TxCode::ChangePlan,
            holder_name,
            &id,
            Decimal::ZERO,
            AccountPlan::New.code(),
        ));
        info!(account = %id, "Changed account plan");
        Ok(())
    }

    /// Credit every pending deposit whose account still exists
    ///
    /// Called once at logout, before the log is flushed. Entries for
    /// accounts removed during the session, or whose credit can no
    /// longer be represented, are dropped with a diagnostic event. The
    /// ledger is cleared unconditionally.
    pub fn apply_pending_deposits(&mut self) {
        let pending = std::mem::take(&mut self.pending_deposits);
        for (id, amount) in pending {
            match self.store.get_mut(&id) {
                Ok(account) => match account.credit(amount) {
                    Ok(()) => debug!(account = %id, %amount, "Applied pending deposit"),
                    Err(e) => {
                        warn!(account = %id, %amount, error = %e, "Dropped pending deposit")
                    }
                },
                Err(_) => {
                    debug!(account = %id, %amount, "Dropped pending deposit for removed account");
                }
            }
        }
    }

    /// Flush the session's transaction records to the daily log file
    ///
    /// # Errors
    ///
    /// Returns `TellerError::Persistence` if the write fails; the buffer
    /// is cleared either way.
    pub fn write_transactions_at_logout(&mut self) -> Result<(), TellerError> {
        self.log.write_and_clear()
    }

    fn check_amount(&self, amount: Decimal) -> Result<(), TellerError> {
        if amount < Decimal::ZERO {
            return Err(TellerError::invalid_amount(amount));
        }
        Ok(())
    }

    fn pending_total(&self, id: &str) -> Decimal {
        self.pending_deposits
            .get(id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn require_admin(&self, session: &Session, operation: &str) -> Result<(), TellerError> {
        if !session.is_admin() {
            return Err(TellerError::admin_required(operation));
        }
        Ok(())
    }

    /// Existence, standing, and ownership checks shared by the
    /// balance-affecting operations
    fn validate_account_access(&self, session: &Session, id: &str) -> Result<(), TellerError> {
        let account = self.store.get(id)?;
        if account.status == AccountStatus::Disabled {
            return Err(TellerError::account_disabled(id));
        }
        // Standard sessions may only touch their own account
        if let Some(holder) = session.holder_name() {
            if !names_match(&account.name, holder) {
                return Err(TellerError::ownership_mismatch(id, holder));
            }
        }
        Ok(())
    }

    fn check_holder_match(&self, id: &str, holder_name: &str) -> Result<(), TellerError> {
        let account = self.store.get(id)?;
        if !names_match(&account.name, holder_name) {
            return Err(TellerError::holder_mismatch(id, holder_name));
        }
        Ok(())
    }
}
