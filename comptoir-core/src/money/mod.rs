//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary computation in the checkout core is done in `Decimal`;
//! values cross the JSON/persistence boundary as `f64` rounded to 2 decimal
//! places. Rounding happens only at that boundary, never between
//! intermediate steps.

use crate::error::{CartError, CartResult};
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
pub(crate) const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed unit price (1,000,000)
const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per cart line
pub const MAX_LINE_QUANTITY: i64 = 9999;
/// Maximum allowed payment amount (1,000,000)
const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field_name: &str) -> CartResult<()> {
    if !value.is_finite() {
        return Err(CartError::InvalidAmount(format!(
            "{} must be a finite number, got {}",
            field_name, value
        )));
    }
    Ok(())
}

/// Validate a unit price before it enters a cart line
pub fn validate_unit_price(price: f64) -> CartResult<()> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(CartError::InvalidAmount(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    if price > MAX_PRICE {
        return Err(CartError::InvalidAmount(format!(
            "price exceeds maximum allowed ({}), got {}",
            MAX_PRICE, price
        )));
    }
    Ok(())
}

/// Validate a requested line quantity
pub fn validate_quantity(quantity: i64) -> CartResult<()> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity(format!(
            "quantity must be positive, got {}",
            quantity
        )));
    }
    if quantity > MAX_LINE_QUANTITY {
        return Err(CartError::InvalidQuantity(format!(
            "quantity exceeds maximum allowed ({}), got {}",
            MAX_LINE_QUANTITY, quantity
        )));
    }
    Ok(())
}

/// Validate a tendered payment amount
pub fn validate_payment_amount(amount: f64) -> CartResult<()> {
    require_finite(amount, "payment amount")?;
    if amount < 0.0 {
        return Err(CartError::InvalidAmount(format!(
            "payment amount must be non-negative, got {}",
            amount
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(CartError::InvalidAmount(format!(
            "payment amount exceeds maximum allowed ({}), got {}",
            MAX_PAYMENT_AMOUNT, amount
        )));
    }
    Ok(())
}

/// Validate a tax rate expressed as a decimal fraction (e.g. 0.08)
pub fn validate_tax_rate(rate: f64) -> CartResult<()> {
    require_finite(rate, "tax rate")?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(CartError::InvalidAmount(format!(
            "tax rate must be between 0 and 1, got {}",
            rate
        )));
    }
    Ok(())
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via the validators above at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption in financial calculations.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        // SAFETY: Decimal rounded to 2dp with max input ≤ 1_000_000 (validated at boundary)
        // is always within f64 representable range (~1.8e308)
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Check if payment is sufficient (with small tolerance for edge cases)
///
/// Returns true if paid >= required - 0.01
pub fn is_payment_sufficient(paid: Decimal, required: Decimal) -> bool {
    paid >= required - MONEY_TOLERANCE
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    let diff = (to_decimal(a) - to_decimal(b)).abs();
    diff < MONEY_TOLERANCE
}
