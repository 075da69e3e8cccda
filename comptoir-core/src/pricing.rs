//! Promotion discount calculation
//!
//! At most one promotion applies per cart, against the pre-tax subtotal.
//! A percentage promotion is rounded to 2 decimal places at the point of
//! application; a fixed promotion is clamped so the net-of-discount
//! subtotal can never go negative. Promotions carry a `min_quantity` field
//! on the wire, which the calculation deliberately does not consult.

use crate::money::{DECIMAL_PLACES, to_decimal};
use rust_decimal::Decimal;
use shared::models::{Promotion, PromotionKind};

/// Discount amount for a promotion against a subtotal
///
/// Returns ZERO when no promotion is applied. The result is never larger
/// than the subtotal and never negative.
pub fn discount_amount(promotion: Option<&Promotion>, subtotal: Decimal) -> Decimal {
    let Some(promotion) = promotion else {
        return Decimal::ZERO;
    };

    let amount = match promotion.kind {
        PromotionKind::Percentage => (subtotal * to_decimal(promotion.value)
            / Decimal::ONE_HUNDRED)
            .round_dp(DECIMAL_PLACES),
        PromotionKind::Fixed => to_decimal(promotion.value),
    };

    amount.clamp(Decimal::ZERO, subtotal.max(Decimal::ZERO))
}
