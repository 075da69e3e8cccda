//! Domain errors for the checkout core
//!
//! Typed errors carrying enough context for an actionable operator message
//! ("Only 3 units of Espresso available, 5 requested"), with conversions
//! into the coded [`AppError`] the API boundary speaks.

use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// One line whose requested quantity exceeds the live stock snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockShortage {
    pub product_id: i64,
    pub name: String,
    pub available: i64,
    pub requested: i64,
}

impl std::fmt::Display for StockShortage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Only {} units of {} available, {} requested",
            self.available, self.name, self.requested
        )
    }
}

/// Cart/checkout errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("{0}")]
    InsufficientStock(StockShortage),

    /// Checkout-time revalidation failure, listing every offending line
    #[error("{} cart line(s) exceed available stock", .0.len())]
    StockConflict(Vec<StockShortage>),

    #[error("Product {0} is not in the cart")]
    LineNotFound(i64),

    #[error("{0} is deactivated and cannot be sold")]
    ProductInactive(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Insufficient payment: {paid:.2} tendered, {required:.2} due")]
    InsufficientPayment { required: f64, paid: f64 },

    #[error("A tendered amount is required for cash payments")]
    PaymentAmountMissing,

    #[error("{0}")]
    InvalidAmount(String),

    #[error("{0}")]
    InvalidQuantity(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let message = err.to_string();
        match err {
            CartError::OutOfStock(name) => {
                AppError::with_message(ErrorCode::ProductOutOfStock, message)
                    .with_detail("product", name)
            }
            CartError::InsufficientStock(s) => {
                AppError::with_message(ErrorCode::ProductInsufficientStock, message)
                    .with_detail("product_id", s.product_id)
                    .with_detail("available", s.available)
                    .with_detail("requested", s.requested)
            }
            CartError::StockConflict(shortages) => {
                let detail = serde_json::to_value(&shortages).unwrap_or_default();
                AppError::with_message(ErrorCode::ProductInsufficientStock, message)
                    .with_detail("shortages", detail)
            }
            CartError::LineNotFound(product_id) => {
                AppError::with_message(ErrorCode::CartLineNotFound, message)
                    .with_detail("product_id", product_id)
            }
            CartError::ProductInactive(name) => {
                AppError::with_message(ErrorCode::ProductInactive, message)
                    .with_detail("product", name)
            }
            CartError::EmptyCart => AppError::with_message(ErrorCode::CartEmpty, message),
            CartError::InsufficientPayment { required, paid } => {
                AppError::with_message(ErrorCode::PaymentInsufficientAmount, message)
                    .with_detail("required", required)
                    .with_detail("paid", paid)
            }
            CartError::PaymentAmountMissing => {
                AppError::with_message(ErrorCode::PaymentInvalidAmount, message)
            }
            CartError::InvalidAmount(_) => {
                AppError::with_message(ErrorCode::PaymentInvalidAmount, message)
            }
            CartError::InvalidQuantity(_) => {
                AppError::with_message(ErrorCode::ValueOutOfRange, message)
            }
        }
    }
}

/// Caisse session errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CaisseError {
    #[error("Session name must not be blank")]
    BlankName,

    #[error("{field} must be a finite, non-negative amount, got {value}")]
    InvalidCashAmount { field: &'static str, value: f64 },

    #[error("Session is already closed")]
    AlreadyClosed,
}

pub type CaisseResult<T> = Result<T, CaisseError>;

impl From<CaisseError> for AppError {
    fn from(err: CaisseError) -> Self {
        let message = err.to_string();
        match err {
            CaisseError::BlankName => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
                    .with_detail("field", "name")
            }
            CaisseError::InvalidCashAmount { field, value } => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
                    .with_detail("field", field)
                    .with_detail("value", value)
            }
            CaisseError::AlreadyClosed => {
                AppError::with_message(ErrorCode::SessionAlreadyClosed, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortage_message_is_actionable() {
        let shortage = StockShortage {
            product_id: 7,
            name: "Espresso".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            shortage.to_string(),
            "Only 3 units of Espresso available, 5 requested"
        );
    }

    #[test]
    fn test_cart_error_codes() {
        let err: AppError = CartError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartEmpty);

        let err: AppError = CartError::OutOfStock("Espresso".to_string()).into();
        assert_eq!(err.code, ErrorCode::ProductOutOfStock);

        let err: AppError = CartError::InsufficientPayment {
            required: 25.92,
            paid: 20.0,
        }
        .into();
        assert_eq!(err.code, ErrorCode::PaymentInsufficientAmount);
        assert!(err.details.unwrap().contains_key("required"));
    }

    #[test]
    fn test_stock_conflict_carries_every_shortage() {
        let shortages = vec![
            StockShortage {
                product_id: 1,
                name: "A".to_string(),
                available: 0,
                requested: 2,
            },
            StockShortage {
                product_id: 2,
                name: "B".to_string(),
                available: 1,
                requested: 3,
            },
        ];
        let err: AppError = CartError::StockConflict(shortages).into();
        assert_eq!(err.code, ErrorCode::ProductInsufficientStock);
        let details = err.details.unwrap();
        let listed = details.get("shortages").unwrap().as_array().unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[test]
    fn test_caisse_error_codes() {
        let err: AppError = CaisseError::BlankName.into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err: AppError = CaisseError::AlreadyClosed.into();
        assert_eq!(err.code, ErrorCode::SessionAlreadyClosed);
    }
}
