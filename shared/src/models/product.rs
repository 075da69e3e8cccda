//! Product Model

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Product catalog snapshot entry
///
/// Read-only on the terminal side. The catalog API owns creation and
/// mutation; the checkout engine only consumes snapshots, so there are no
/// create/update payloads here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    /// Unit price (2 decimal places)
    pub price: f64,
    /// On-hand quantity at snapshot time (never negative)
    pub current_stock: i64,
    pub category: Option<String>,
    pub is_active: bool,
}

impl Product {
    /// Whether at least one unit can be sold from this snapshot
    pub fn in_stock(&self) -> bool {
        self.current_stock > 0
    }
}

/// Point-in-time view of on-hand stock, keyed by product ID
///
/// Injected into checkout for revalidation: stock may have moved between
/// the last catalog fetch and the commit, so the cart's own line snapshots
/// are not authoritative. A product absent from the snapshot is treated as
/// having no sellable stock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockSnapshot {
    levels: HashMap<i64, i64>,
}

impl StockSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from a freshly fetched product list
    pub fn from_products(products: &[Product]) -> Self {
        Self {
            levels: products
                .iter()
                .map(|p| (p.id, p.current_stock))
                .collect(),
        }
    }

    pub fn set(&mut self, product_id: i64, on_hand: i64) {
        self.levels.insert(product_id, on_hand);
    }

    /// On-hand quantity for a product, zero when unknown
    pub fn on_hand(&self, product_id: i64) -> i64 {
        self.levels.get(&product_id).copied().unwrap_or(0)
    }
}
