//! Shared types for the Comptoir point-of-sale suite
//!
//! Domain models and the unified error system used by both the
//! checkout core and the API client.

pub mod error;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
