//! Promotion Model

use serde::{Deserialize, Serialize};

/// Promotion kind enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionKind {
    Percentage,
    Fixed,
}

/// Promotion entity
///
/// At most one promotion applies to a cart. `min_quantity` is carried on
/// the wire but not consulted by the discount calculation; the backend
/// serves it for display only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Promotion {
    pub id: i64,
    pub name: String,
    pub kind: PromotionKind,
    /// Percentage: 20 = 20% off the subtotal. Fixed: flat amount off.
    pub value: f64,
    pub min_quantity: Option<i64>,
    /// Valid from datetime (Unix millis)
    pub valid_from: Option<i64>,
    /// Valid until datetime (Unix millis)
    pub valid_until: Option<i64>,
    pub is_active: bool,
}

impl Promotion {
    /// Whether the promotion is active and inside its validity window
    ///
    /// The backend's "active promotions" endpoint already filters on this;
    /// the helper exists for callers holding a cached promotion list.
    pub fn is_current(&self, now_millis: i64) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(from) = self.valid_from
            && now_millis < from
        {
            return false;
        }
        if let Some(until) = self.valid_until
            && now_millis > until
        {
            return false;
        }
        true
    }
}
