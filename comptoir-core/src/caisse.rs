//! Caisse session tracker
//!
//! Lifecycle of one cash-drawer shift: open with a counted float, read
//! aggregated sales figures from the backend while active, close against a
//! counted drawer. Closing computes
//!
//! ```text
//! expected_amount = opening_amount + cash_revenue
//! difference      = closing_amount - expected_amount
//! ```
//!
//! where `cash_revenue` comes from [`SessionStatistics`] (cash-only sales
//! recorded against the session). A positive difference is an overage, a
//! negative one a shortage. Close is terminal: the record becomes an
//! immutable audit artifact. At-most-one-active-session is the persistence
//! layer's contract, not enforced here: one terminal cannot see another's
//! sessions.

use chrono::Utc;

use crate::error::{CaisseError, CaisseResult};
use crate::money::{to_decimal, to_f64};
use shared::models::{CaisseSession, SessionStatistics, SessionStatus};

/// Validate a cash amount is finite and non-negative
fn validate_cash(value: f64, field: &'static str) -> CaisseResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CaisseError::InvalidCashAmount { field, value });
    }
    Ok(())
}

/// Open a new session with a counted opening float
///
/// The returned session has no `id` until the backend persists it.
pub fn open_session(
    name: &str,
    opening_amount: f64,
    description: Option<String>,
) -> CaisseResult<CaisseSession> {
    if name.trim().is_empty() {
        return Err(CaisseError::BlankName);
    }
    validate_cash(opening_amount, "opening_amount")?;

    Ok(CaisseSession {
        id: None,
        name: name.trim().to_string(),
        status: SessionStatus::Active,
        opening_amount: to_f64(to_decimal(opening_amount)),
        opened_at: Utc::now().timestamp_millis(),
        closed_at: None,
        closing_amount: None,
        expected_amount: None,
        difference: None,
        description,
        notes: None,
    })
}

/// Expected drawer content and variance for a counted amount
///
/// Returns `(expected_amount, difference)` without touching the session;
/// used for the pre-close reconciliation display.
pub fn session_variance(
    session: &CaisseSession,
    stats: &SessionStatistics,
    counted: f64,
) -> (f64, f64) {
    let expected = to_decimal(session.opening_amount) + to_decimal(stats.cash_revenue);
    let difference = to_decimal(counted) - expected;
    (to_f64(expected), to_f64(difference))
}

/// Close a session against a counted drawer
///
/// Computes the expected amount and variance from the session's opening
/// float and the backend's cash-revenue aggregate, stamps the close time,
/// and transitions the session to `Closed`. A closed session can never
/// reopen or be recomputed.
pub fn close_session(
    session: &mut CaisseSession,
    closing_amount: f64,
    stats: &SessionStatistics,
    notes: Option<String>,
) -> CaisseResult<()> {
    validate_cash(closing_amount, "closing_amount")?;
    validate_cash(stats.cash_revenue, "cash_revenue")?;

    if session.status == SessionStatus::Closed {
        return Err(CaisseError::AlreadyClosed);
    }

    let expected = to_decimal(session.opening_amount) + to_decimal(stats.cash_revenue);
    let difference = to_decimal(closing_amount) - expected;

    session.status = SessionStatus::Closed;
    session.closed_at = Some(Utc::now().timestamp_millis());
    session.closing_amount = Some(to_f64(to_decimal(closing_amount)));
    session.expected_amount = Some(to_f64(expected));
    session.difference = Some(to_f64(difference));
    if notes.is_some() {
        session.notes = notes;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(cash_revenue: f64) -> SessionStatistics {
        SessionStatistics {
            transactions_count: 12,
            total_revenue: cash_revenue + 80.0,
            cash_revenue,
        }
    }

    #[test]
    fn test_open_session() {
        let session =
            open_session("Caisse 1 - morning", 100.0, Some("Front till".to_string())).unwrap();

        assert!(session.id.is_none());
        assert_eq!(session.name, "Caisse 1 - morning");
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.opening_amount, 100.0);
        assert!(session.opened_at > 0);
        assert!(session.closed_at.is_none());
        assert!(session.expected_amount.is_none());
        assert_eq!(session.description.as_deref(), Some("Front till"));
    }

    #[test]
    fn test_open_session_trims_name() {
        let session = open_session("  Caisse 1  ", 0.0, None).unwrap();
        assert_eq!(session.name, "Caisse 1");
    }

    #[test]
    fn test_open_session_blank_name_fails() {
        assert_eq!(open_session("", 100.0, None), Err(CaisseError::BlankName));
        assert_eq!(
            open_session("   ", 100.0, None),
            Err(CaisseError::BlankName)
        );
    }

    #[test]
    fn test_open_session_negative_float_fails() {
        let result = open_session("Caisse 1", -5.0, None);
        assert_eq!(
            result,
            Err(CaisseError::InvalidCashAmount {
                field: "opening_amount",
                value: -5.0
            })
        );
    }

    #[test]
    fn test_close_session_shortage() {
        // Opened with 100.00, cash sales 250.00, counted 345.00:
        // expected 350.00, difference -5.00 (shortage)
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();

        close_session(&mut session, 345.0, &stats(250.0), None).unwrap();

        assert_eq!(session.status, SessionStatus::Closed);
        assert_eq!(session.closing_amount, Some(345.0));
        assert_eq!(session.expected_amount, Some(350.0));
        assert_eq!(session.difference, Some(-5.0));
        assert!(session.closed_at.is_some());
    }

    #[test]
    fn test_close_session_overage_is_positive() {
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();
        close_session(&mut session, 352.5, &stats(250.0), None).unwrap();
        assert_eq!(session.difference, Some(2.5));
    }

    #[test]
    fn test_close_session_balanced_drawer() {
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();
        close_session(&mut session, 350.0, &stats(250.0), None).unwrap();
        assert_eq!(session.difference, Some(0.0));
    }

    #[test]
    fn test_close_session_negative_count_fails() {
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();
        let result = close_session(&mut session, -1.0, &stats(250.0), None);
        assert!(matches!(
            result,
            Err(CaisseError::InvalidCashAmount {
                field: "closing_amount",
                ..
            })
        ));
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[test]
    fn test_close_session_twice_fails() {
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();
        close_session(&mut session, 350.0, &stats(250.0), None).unwrap();

        let closed_at = session.closed_at;
        let result = close_session(&mut session, 400.0, &stats(300.0), None);

        assert_eq!(result, Err(CaisseError::AlreadyClosed));
        // The historical record is untouched
        assert_eq!(session.closing_amount, Some(350.0));
        assert_eq!(session.closed_at, closed_at);
    }

    #[test]
    fn test_close_session_records_notes() {
        let mut session = open_session("Caisse 1", 100.0, None).unwrap();
        close_session(
            &mut session,
            345.0,
            &stats(250.0),
            Some("5 short, till drawer jammed".to_string()),
        )
        .unwrap();
        assert_eq!(session.notes.as_deref(), Some("5 short, till drawer jammed"));
    }

    #[test]
    fn test_session_variance_preview() {
        let session = open_session("Caisse 1", 100.0, None).unwrap();
        let (expected, difference) = session_variance(&session, &stats(250.0), 345.0);

        assert_eq!(expected, 350.0);
        assert_eq!(difference, -5.0);
        // Preview does not close
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[test]
    fn test_variance_decimal_safe() {
        // 0.1 + 0.2 style inputs must not produce float noise
        let mut session = open_session("Caisse 1", 0.1, None).unwrap();
        close_session(&mut session, 0.3, &stats(0.2), None).unwrap();
        assert_eq!(session.expected_amount, Some(0.3));
        assert_eq!(session.difference, Some(0.0));
    }
}
