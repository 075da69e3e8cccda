//! Comptoir Client - HTTP client for the POS data API
//!
//! Typed wrappers over the backend REST contract: product catalog, active
//! promotions, tax rate, sale submission and caisse sessions.

pub mod client;
pub mod config;
pub mod error;

pub use client::{ComptoirClient, NetworkClient, PosApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};

#[cfg(feature = "in-process")]
pub use client::InProcessClient;

// Re-export shared types for convenience
pub use shared::error::ApiResponse;
