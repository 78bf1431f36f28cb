//! Session state for the Rust Teller Engine
//!
//! A session is the ephemeral per-login state machine: who is logged in,
//! with what privileges, and how much they have spent per operation kind
//! since logging in. Exactly one session exists per run.

use super::error::TellerError;
use rust_decimal::Decimal;

/// Per-session withdrawal limit for standard sessions ($500.00)
pub const WITHDRAWAL_LIMIT: Decimal = Decimal::from_parts(50000, 0, 0, false, 2);

/// Per-session transfer limit for standard sessions ($1000.00)
pub const TRANSFER_LIMIT: Decimal = Decimal::from_parts(100000, 0, 0, false, 2);

/// Per-session bill payment limit for standard sessions ($2000.00)
pub const PAYBILL_LIMIT: Decimal = Decimal::from_parts(200000, 0, 0, false, 2);

/// Operation kinds subject to cumulative session limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpendingKind {
    Withdrawal,
    Transfer,
    Paybill,
}

impl SpendingKind {
    /// The per-session limit for this kind (standard sessions only)
    pub fn limit(&self) -> Decimal {
        match self {
            SpendingKind::Withdrawal => WITHDRAWAL_LIMIT,
            SpendingKind::Transfer => TRANSFER_LIMIT,
            SpendingKind::Paybill => PAYBILL_LIMIT,
        }
    }

    /// Human-readable kind name used in limit error messages
    pub fn label(&self) -> &'static str {
        match self {
            SpendingKind::Withdrawal => "withdrawal",
            SpendingKind::Transfer => "transfer",
            SpendingKind::Paybill => "bill payment",
        }
    }
}

/// Who holds the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRole {
    /// No active login
    LoggedOut,
    /// Standard login bound to one holder name, subject to limits
    Standard {
        /// Holder name supplied at login
        holder: String,
    },
    /// Unrestricted admin login, not bound to any holder
    Admin,
}

/// Ephemeral per-login state
///
/// Tracks the active role and the cumulative amounts validated per
/// limited operation kind. Totals reset on every login and logout
/// transition and never persist across a session boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    role: SessionRole,
    withdrawal_total: Decimal,
    transfer_total: Decimal,
    paybill_total: Decimal,
}

impl Session {
    /// Create a session in the logged-out state with zero totals
    pub fn new() -> Self {
        Session {
            role: SessionRole::LoggedOut,
            withdrawal_total: Decimal::ZERO,
            transfer_total: Decimal::ZERO,
            paybill_total: Decimal::ZERO,
        }
    }

    /// Begin a standard session for `holder`
    ///
    /// Resets all running totals. Callers check `is_logged_in` first;
    /// logging in over an active session resets it either way.
    pub fn login_standard(&mut self, holder: &str) {
        self.role = SessionRole::Standard {
            holder: holder.to_string(),
        };
        self.reset_totals();
    }

    /// Begin an admin session
    ///
    /// Resets all running totals. Callers check `is_logged_in` first.
    pub fn login_admin(&mut self) {
        self.role = SessionRole::Admin;
        self.reset_totals();
    }

    /// End the current session, clearing identity and totals
    pub fn logout(&mut self) {
        self.role = SessionRole::LoggedOut;
        self.reset_totals();
    }

    /// Whether any login is active
    pub fn is_logged_in(&self) -> bool {
        self.role != SessionRole::LoggedOut
    }

    /// Whether the active login is an admin session
    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }

    /// Holder name of a standard session, if one is active
    pub fn holder_name(&self) -> Option<&str> {
        match &self.role {
            SessionRole::Standard { holder } => Some(holder),
            _ => None,
        }
    }

    /// Cumulative validated amount for `kind` in this login
    pub fn total_for(&self, kind: SpendingKind) -> Decimal {
        match kind {
            SpendingKind::Withdrawal => self.withdrawal_total,
            SpendingKind::Transfer => self.transfer_total,
            SpendingKind::Paybill => self.paybill_total,
        }
    }

    /// Check whether spending `amount` more on `kind` stays within the limit
    ///
    /// A cumulative total exactly equal to the limit is allowed; crossing
    /// it is rejected. A new total too large to represent counts as
    /// exceeding the limit. Only meaningful for standard sessions - the
    /// rule engine never calls this for admin sessions.
    ///
    /// # Errors
    ///
    /// Returns `TellerError::LimitExceeded` if the new total would exceed
    /// the per-session limit for `kind`.
    pub fn check_limit(&self, kind: SpendingKind, amount: Decimal) -> Result<(), TellerError> {
        match self.total_for(kind).checked_add(amount) {
            Some(new_total) if new_total <= kind.limit() => Ok(()),
            _ => Err(TellerError::limit_exceeded(kind.label(), kind.limit())),
        }
    }

    /// Record a validated amount against `kind`'s running total
    ///
    /// Called only after the operation's mutation has succeeded. The
    /// addition saturates at the representable maximum.
    pub fn record_spent(&mut self, kind: SpendingKind, amount: Decimal) {
        let total = match kind {
            SpendingKind::Withdrawal => &mut self.withdrawal_total,
            SpendingKind::Transfer => &mut self.transfer_total,
            SpendingKind::Paybill => &mut self.paybill_total,
        };
        *total = total.saturating_add(amount);
    }

    fn reset_totals(&mut self) {
        self.withdrawal_total = Decimal::ZERO;
        self.transfer_total = Decimal::ZERO;
        self.paybill_total = Decimal::ZERO;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_session_is_logged_out() {
        let session = Session::new();
        assert!(!session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.holder_name(), None);
    }

    #[test]
    fn test_standard_login_binds_holder() {
        let mut session = Session::new();
        session.login_standard("Alice");
        assert!(session.is_logged_in());
        assert!(!session.is_admin());
        assert_eq!(session.holder_name(), Some("Alice"));
    }

    #[test]
    fn test_admin_login_has_no_holder() {
        let mut session = Session::new();
        session.login_admin();
        assert!(session.is_logged_in());
        assert!(session.is_admin());
        assert_eq!(session.holder_name(), None);
    }

    #[test]
    fn test_logout_clears_identity_and_totals() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Withdrawal, Decimal::new(30000, 2));
        session.logout();
        assert!(!session.is_logged_in());
        assert_eq!(session.holder_name(), None);
        assert_eq!(session.total_for(SpendingKind::Withdrawal), Decimal::ZERO);
    }

    #[test]
    fn test_login_resets_totals_from_prior_session() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Transfer, Decimal::new(40000, 2));
        session.logout();
        session.login_standard("Bob");
        assert_eq!(session.total_for(SpendingKind::Transfer), Decimal::ZERO);
    }

    #[rstest]
    #[case::withdrawal(SpendingKind::Withdrawal, Decimal::new(50000, 2))]
    #[case::transfer(SpendingKind::Transfer, Decimal::new(100000, 2))]
    #[case::paybill(SpendingKind::Paybill, Decimal::new(200000, 2))]
    fn test_kind_limits(#[case] kind: SpendingKind, #[case] expected: Decimal) {
        assert_eq!(kind.limit(), expected);
    }

    #[rstest]
    #[case::under(Decimal::new(49999, 2), true)]
    #[case::exactly_at_limit(Decimal::new(50000, 2), true)]
    #[case::over(Decimal::new(50001, 2), false)]
    fn test_check_limit_boundary(#[case] amount: Decimal, #[case] allowed: bool) {
        let mut session = Session::new();
        session.login_standard("Alice");
        let result = session.check_limit(SpendingKind::Withdrawal, amount);
        assert_eq!(result.is_ok(), allowed);
    }

    #[test]
    fn test_check_limit_is_cumulative() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Withdrawal, Decimal::new(45000, 2));
        assert!(session
            .check_limit(SpendingKind::Withdrawal, Decimal::new(5000, 2))
            .is_ok());
        assert!(session
            .check_limit(SpendingKind::Withdrawal, Decimal::new(5001, 2))
            .is_err());
    }

    #[test]
    fn test_check_limit_rejects_unrepresentable_total() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Withdrawal, Decimal::new(30000, 2));
        let result = session.check_limit(SpendingKind::Withdrawal, Decimal::MAX);
        assert!(matches!(result, Err(TellerError::LimitExceeded { .. })));
    }

    #[test]
    fn test_record_spent_saturates() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Transfer, Decimal::MAX);
        session.record_spent(SpendingKind::Transfer, Decimal::MAX);
        assert_eq!(session.total_for(SpendingKind::Transfer), Decimal::MAX);
    }

    #[test]
    fn test_totals_tracked_per_kind() {
        let mut session = Session::new();
        session.login_standard("Alice");
        session.record_spent(SpendingKind::Withdrawal, Decimal::new(10000, 2));
        session.record_spent(SpendingKind::Paybill, Decimal::new(20000, 2));
        assert_eq!(
            session.total_for(SpendingKind::Withdrawal),
            Decimal::new(10000, 2)
        );
        assert_eq!(session.total_for(SpendingKind::Transfer), Decimal::ZERO);
        assert_eq!(
            session.total_for(SpendingKind::Paybill),
            Decimal::new(20000, 2)
        );
    }
}
