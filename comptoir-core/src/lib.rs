//! Checkout core for the Comptoir point-of-sale suite
//!
//! Pure business logic, no I/O: the cart/checkout engine and the caisse
//! session tracker. Catalog, promotion and stock data arrive as read-only
//! snapshots fetched by the caller (see `comptoir-client`); sale drafts and
//! closed sessions leave the same way.
//!
//! # Data Flow
//!
//! 1. Caller fetches products / promotions / tax rate from the data API
//! 2. [`cart::Cart`] accumulates lines, validating against the snapshots
//! 3. `Cart::checkout` revalidates stock and emits a [`shared::models::SaleDraft`]
//! 4. Caller submits the draft; the backend is the stock authority
//! 5. [`caisse`] reconciles the drawer from the backend's sale aggregates
//!
//! Stock checks here are advisory (fast terminal feedback); the
//! authoritative check happens server-side at commit time.

pub mod caisse;
pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;

// Re-exports
pub use caisse::{close_session, open_session, session_variance};
pub use cart::{Cart, CartEvent, CartLine, CartTotals, CheckoutRequest};
pub use error::{CaisseError, CaisseResult, CartError, CartResult, StockShortage};
