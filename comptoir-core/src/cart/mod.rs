//! Cart/checkout engine
//!
//! Holds the single in-progress sale for one terminal: line items
//! referencing catalog snapshots, an optional customer, and at most one
//! promotion. Derived totals follow a fixed pipeline:
//!
//! ```text
//! subtotal -> discount -> net_after_discount -> tax -> total
//! ```
//!
//! Stock is checked twice. At add/update time the check runs against the
//! product snapshot the caller fetched (fast terminal feedback); at
//! checkout time every line is revalidated against a freshly injected
//! [`StockSnapshot`], because stock may have moved since the last fetch.
//! Both checks are advisory; the backend performs the authoritative check
//! when the sale is committed.
//!
//! Checkout is all-or-nothing: it either returns a [`SaleDraft`] and
//! resets the cart, or fails and leaves the cart exactly as it was.
//!
//! Every mutation returns a [`CartEvent`]. Collaborators that watch the
//! cart (stock alert polling, customer display refresh) consume these
//! events; the engine itself has no outbound dependencies.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CartError, CartResult, StockShortage};
use crate::money::{self, is_payment_sufficient, to_decimal, to_f64};
use crate::pricing;
use shared::models::{
    Customer, PaymentMethod, Product, Promotion, SaleDraft, SaleItem, StockSnapshot,
};

/// One product+quantity entry in an in-progress sale
///
/// `unit_price` is snapshotted when the line is first added so a mid-sale
/// catalog reprice cannot silently change what the customer was quoted;
/// `available_stock` is refreshed on every add so quantity checks track the
/// latest snapshot the terminal has seen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub sku: String,
    pub unit_price: f64,
    pub available_stock: i64,
    pub quantity: i64,
}

impl CartLine {
    /// Exact line subtotal (unit price × quantity)
    pub fn line_subtotal(&self) -> Decimal {
        to_decimal(self.unit_price) * Decimal::from(self.quantity)
    }
}

/// Cart mutation event
///
/// Returned by every mutating operation. This is the hook point for
/// external collaborators; the core never calls out itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartEvent {
    LineAdded { product_id: i64, quantity: i64 },
    QuantityChanged { product_id: i64, quantity: i64 },
    LineRemoved { product_id: i64 },
    Cleared,
    CustomerSelected { customer_id: i64 },
    CustomerCleared,
    PromotionApplied { promotion_id: i64 },
    PromotionCleared,
}

/// Derived monetary figures for a cart
///
/// All values are exact `Decimal`s (the percentage discount is rounded to
/// cents at application, nothing else is). Rounding to 2 decimal places
/// happens only when a [`SaleDraft`] is produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub net_after_discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Checkout input
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    /// Cash tendered; required for cash, ignored for card/mobile
    pub amount_paid: Option<f64>,
    pub caisse_session_id: Option<i64>,
}

/// The single in-progress sale for one terminal
///
/// Exclusively owned by the active checkout session; no interior locking,
/// UI event handlers run to completion before the next action.
#[derive(Debug, Clone)]
pub struct Cart {
    tax_rate: Decimal,
    lines: Vec<CartLine>,
    customer: Option<Customer>,
    promotion: Option<Promotion>,
}

impl Cart {
    /// Create an empty cart
    ///
    /// `tax_rate` is a decimal fraction (e.g. 0.08 for 8%) supplied by the
    /// settings API.
    pub fn new(tax_rate: f64) -> CartResult<Self> {
        money::validate_tax_rate(tax_rate)?;
        Ok(Self {
            tax_rate: to_decimal(tax_rate),
            lines: Vec::new(),
            customer: None,
            promotion: None,
        })
    }

    // ==================== Accessors ====================

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total unit count across all lines
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn selected_customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn selected_promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    // ==================== Mutations ====================

    /// Add a product to the cart, merging into an existing line
    ///
    /// The product argument is the caller's latest catalog snapshot; its
    /// `current_stock` bounds the resulting line quantity. A brand-new line
    /// for a product with no stock fails with `OutOfStock`; exceeding the
    /// snapshot fails with `InsufficientStock`.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CartResult<CartEvent> {
        money::validate_unit_price(product.price)?;
        money::validate_quantity(quantity)?;

        if !product.is_active {
            return Err(CartError::ProductInactive(product.name.clone()));
        }

        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => {
                let new_quantity = line.quantity + quantity;
                money::validate_quantity(new_quantity)?;
                if new_quantity > product.current_stock {
                    return Err(CartError::InsufficientStock(StockShortage {
                        product_id: product.id,
                        name: product.name.clone(),
                        available: product.current_stock,
                        requested: new_quantity,
                    }));
                }
                line.quantity = new_quantity;
                line.available_stock = product.current_stock;
                Ok(CartEvent::LineAdded {
                    product_id: product.id,
                    quantity: new_quantity,
                })
            }
            None => {
                if product.current_stock <= 0 {
                    return Err(CartError::OutOfStock(product.name.clone()));
                }
                if quantity > product.current_stock {
                    return Err(CartError::InsufficientStock(StockShortage {
                        product_id: product.id,
                        name: product.name.clone(),
                        available: product.current_stock,
                        requested: quantity,
                    }));
                }
                self.lines.push(CartLine {
                    product_id: product.id,
                    name: product.name.clone(),
                    sku: product.sku.clone(),
                    unit_price: product.price,
                    available_stock: product.current_stock,
                    quantity,
                });
                Ok(CartEvent::LineAdded {
                    product_id: product.id,
                    quantity,
                })
            }
        }
    }

    /// Set a line's quantity
    ///
    /// A quantity of zero or less removes the line (equivalent to
    /// [`Cart::remove_item`], including the no-op on an absent line, hence
    /// `Ok(None)`). The new quantity is checked against the line's stock
    /// snapshot.
    pub fn set_quantity(
        &mut self,
        product_id: i64,
        quantity: i64,
    ) -> CartResult<Option<CartEvent>> {
        if quantity <= 0 {
            return Ok(self.remove_item(product_id));
        }

        money::validate_quantity(quantity)?;

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Err(CartError::LineNotFound(product_id));
        };

        if quantity > line.available_stock {
            return Err(CartError::InsufficientStock(StockShortage {
                product_id,
                name: line.name.clone(),
                available: line.available_stock,
                requested: quantity,
            }));
        }

        line.quantity = quantity;
        Ok(Some(CartEvent::QuantityChanged {
            product_id,
            quantity,
        }))
    }

    /// Remove a line if present; absent lines are a no-op, not an error
    pub fn remove_item(&mut self, product_id: i64) -> Option<CartEvent> {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        (self.lines.len() < before).then_some(CartEvent::LineRemoved { product_id })
    }

    /// Empty the cart: lines, customer and promotion
    pub fn clear(&mut self) -> CartEvent {
        self.lines.clear();
        self.customer = None;
        self.promotion = None;
        CartEvent::Cleared
    }

    /// Set or clear the customer reference
    pub fn select_customer(&mut self, customer: Option<Customer>) -> CartEvent {
        let event = match &customer {
            Some(c) => CartEvent::CustomerSelected { customer_id: c.id },
            None => CartEvent::CustomerCleared,
        };
        self.customer = customer;
        event
    }

    /// Set or clear the single active promotion
    ///
    /// No minimum-purchase enforcement: `min_quantity` on the promotion is
    /// display-only.
    pub fn apply_promotion(&mut self, promotion: Option<Promotion>) -> CartEvent {
        let event = match &promotion {
            Some(p) => CartEvent::PromotionApplied { promotion_id: p.id },
            None => CartEvent::PromotionCleared,
        };
        self.promotion = promotion;
        event
    }

    // ==================== Derived figures ====================

    /// Compute all derived monetary figures
    pub fn totals(&self) -> CartTotals {
        let subtotal: Decimal = self.lines.iter().map(|l| l.line_subtotal()).sum();
        let discount = pricing::discount_amount(self.promotion.as_ref(), subtotal);
        let net_after_discount = subtotal - discount;
        let tax = net_after_discount * self.tax_rate;
        let total = net_after_discount + tax;

        CartTotals {
            subtotal,
            discount,
            net_after_discount,
            tax,
            total,
        }
    }

    // ==================== Checkout ====================

    /// Finalize the sale
    ///
    /// Validates against the injected live stock snapshot, settles the
    /// payment, and on success resets the cart and returns the draft to
    /// submit. On any failure the cart is left unchanged and remains
    /// editable.
    pub fn checkout(
        &mut self,
        request: CheckoutRequest,
        stock: &StockSnapshot,
    ) -> CartResult<SaleDraft> {
        // 1. A sale needs at least one line
        if self.lines.is_empty() {
            return Err(CartError::EmptyCart);
        }

        // 2. Revalidate every line against the live snapshot, reporting all
        //    offending lines at once
        let shortages: Vec<StockShortage> = self
            .lines
            .iter()
            .filter_map(|line| {
                let available = stock.on_hand(line.product_id);
                (line.quantity > available).then(|| StockShortage {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    available,
                    requested: line.quantity,
                })
            })
            .collect();
        if !shortages.is_empty() {
            return Err(CartError::StockConflict(shortages));
        }

        // 3. Settle the payment
        let totals = self.totals();
        let (amount_paid, change_given) = match request.payment_method {
            PaymentMethod::Cash => {
                let paid = request
                    .amount_paid
                    .ok_or(CartError::PaymentAmountMissing)?;
                money::validate_payment_amount(paid)?;
                let paid_dec = to_decimal(paid);
                if !is_payment_sufficient(paid_dec, totals.total) {
                    return Err(CartError::InsufficientPayment {
                        required: to_f64(totals.total),
                        paid,
                    });
                }
                let change = (paid_dec - totals.total).max(Decimal::ZERO);
                (paid_dec, change)
            }
            // Non-cash settles at exactly the total
            PaymentMethod::Card | PaymentMethod::Mobile => (totals.total, Decimal::ZERO),
        };

        // 4. Build the immutable draft (monetary fields rounded here, at
        //    the persistence boundary)
        let draft = SaleDraft {
            reference: Uuid::new_v4().to_string(),
            items: self
                .lines
                .iter()
                .map(|line| SaleItem {
                    product_id: line.product_id,
                    name: line.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: to_f64(line.line_subtotal()),
                })
                .collect(),
            payment_method: request.payment_method,
            customer_id: self.customer.as_ref().map(|c| c.id),
            promotion_id: self.promotion.as_ref().map(|p| p.id),
            subtotal: to_f64(totals.subtotal),
            discount_amount: to_f64(totals.discount),
            tax_amount: to_f64(totals.tax),
            total_amount: to_f64(totals.total),
            amount_paid: to_f64(amount_paid),
            change_given: to_f64(change_given),
            caisse_session_id: request.caisse_session_id,
        };

        // 5. The sale is final: reset for the next customer
        self.clear();

        Ok(draft)
    }
}
