//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// Referenced by a cart (never owned); customer management lives in the
/// backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
}
