//! Caisse Session Model

use serde::{Deserialize, Serialize};

/// Caisse session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "CLOSED")]
    Closed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// Caisse session record - one cash-drawer shift, from opening float to
/// reconciled close
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaisseSession {
    pub id: Option<i64>,
    /// Session display name (e.g. "Caisse 1 - morning")
    pub name: String,
    pub status: SessionStatus,
    /// Opening float counted into the drawer
    pub opening_amount: f64,
    /// Session open time (Unix millis)
    pub opened_at: i64,
    /// Session close time (Unix millis), None while active
    pub closed_at: Option<i64>,
    /// Actual cash counted at close
    pub closing_amount: Option<f64>,
    /// Opening float plus cash revenue recorded during the session
    pub expected_amount: Option<f64>,
    /// closing_amount - expected_amount (positive = overage, negative = shortage)
    pub difference: Option<f64>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

/// Open session payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpen {
    pub name: String,
    /// Opening float (default 0)
    #[serde(default)]
    pub opening_amount: f64,
    pub description: Option<String>,
}

/// Close session payload (with cash counting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCloseRequest {
    /// Actual cash counted
    pub closing_amount: f64,
    pub notes: Option<String>,
}

/// Aggregated sales figures for one session
///
/// Produced by the backend aggregation API filtered by session ID; the
/// terminal reads these, it never aggregates sales itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStatistics {
    pub transactions_count: i64,
    /// Revenue across all payment methods
    pub total_revenue: f64,
    /// Cash-only revenue (the reconciliation basis)
    pub cash_revenue: f64,
}
