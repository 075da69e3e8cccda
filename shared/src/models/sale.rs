//! Sale Model
//!
//! Shapes for the checkout output and the persisted sale record. Monetary
//! fields are `f64` on the wire, rounded to 2 decimal places by the
//! checkout engine before they land here.

use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}

/// One sold line inside a sale record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub product_id: i64,
    /// Product name snapshot (for receipts/statistics)
    pub name: String,
    pub quantity: i64,
    /// Unit price at sale time
    pub unit_price: f64,
    pub line_total: f64,
}

/// Finalized checkout output, ready for submission
///
/// Emitted once per successful checkout and immutable thereafter. The
/// `reference` is a client-generated UUID so a resubmission after a network
/// failure is recognizable server-side; `id` and timestamps are assigned by
/// the backend on persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    /// Client-generated idempotency reference (UUID v4)
    pub reference: String,
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_id: Option<i64>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub amount_paid: f64,
    pub change_given: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caisse_session_id: Option<i64>,
}

/// Persisted sale record as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTransaction {
    pub id: i64,
    pub reference: String,
    pub items: Vec<SaleItem>,
    pub payment_method: PaymentMethod,
    pub customer_id: Option<i64>,
    pub promotion_id: Option<i64>,
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total_amount: f64,
    pub amount_paid: f64,
    pub change_given: f64,
    pub caisse_session_id: Option<i64>,
    /// Persist time (Unix millis)
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_is_cash() {
        assert!(PaymentMethod::Cash.is_cash());
        assert!(!PaymentMethod::Card.is_cash());
        assert!(!PaymentMethod::Mobile.is_cash());
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"CASH\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Mobile).unwrap(),
            "\"MOBILE\""
        );
        let method: PaymentMethod = serde_json::from_str("\"CARD\"").unwrap();
        assert_eq!(method, PaymentMethod::Card);
    }

    #[test]
    fn test_sale_draft_omits_absent_options() {
        let draft = SaleDraft {
            reference: "ref-1".to_string(),
            items: vec![],
            payment_method: PaymentMethod::Card,
            customer_id: None,
            promotion_id: None,
            subtotal: 10.0,
            discount_amount: 0.0,
            tax_amount: 0.8,
            total_amount: 10.8,
            amount_paid: 10.8,
            change_given: 0.0,
            caisse_session_id: None,
        };

        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("customer_id"));
        assert!(!json.contains("promotion_id"));
        assert!(!json.contains("caisse_session_id"));
    }
}
