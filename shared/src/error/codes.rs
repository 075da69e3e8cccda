//! Unified error codes for the Comptoir suite
//!
//! This module defines all error codes used across the checkout core, the
//! API client, and the backend contract. Error codes are organized by
//! category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Agency (tenant) errors
//! - 4xxx: Sale/cart errors
//! - 5xxx: Payment errors
//! - 6xxx: Product/stock errors
//! - 7xxx: Promotion errors
//! - 8xxx: Caisse session errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Agency ====================
    /// Agency not found
    AgencyNotFound = 3001,
    /// Agency is deactivated
    AgencyInactive = 3002,

    // ==================== 4xxx: Sale ====================
    /// Sale not found
    SaleNotFound = 4001,
    /// Cart is empty
    CartEmpty = 4002,
    /// Cart line not found
    CartLineNotFound = 4003,
    /// Customer not found
    CustomerNotFound = 4101,

    // ==================== 5xxx: Payment ====================
    /// Payment processing failed
    PaymentFailed = 5001,
    /// Insufficient payment amount
    PaymentInsufficientAmount = 5002,
    /// Invalid payment method
    PaymentInvalidMethod = 5003,
    /// Invalid payment amount
    PaymentInvalidAmount = 5004,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product has invalid price
    ProductInvalidPrice = 6002,
    /// Product is out of stock
    ProductOutOfStock = 6003,
    /// Requested quantity exceeds available stock
    ProductInsufficientStock = 6004,
    /// Product is deactivated
    ProductInactive = 6005,

    // ==================== 7xxx: Promotion ====================
    /// Promotion not found
    PromotionNotFound = 7001,
    /// Promotion is deactivated
    PromotionInactive = 7002,
    /// Promotion is outside its validity window
    PromotionExpired = 7003,

    // ==================== 8xxx: Caisse Session ====================
    /// Caisse session not found
    SessionNotFound = 8001,
    /// An active caisse session already exists
    SessionAlreadyActive = 8002,
    /// Caisse session is already closed
    SessionAlreadyClosed = 8003,
    /// Caisse session is not active
    SessionNotActive = 8004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Agency
            ErrorCode::AgencyNotFound => "Agency not found",
            ErrorCode::AgencyInactive => "Agency is deactivated",

            // Sale
            ErrorCode::SaleNotFound => "Sale not found",
            ErrorCode::CartEmpty => "Cart is empty",
            ErrorCode::CartLineNotFound => "Cart line not found",
            ErrorCode::CustomerNotFound => "Customer not found",

            // Payment
            ErrorCode::PaymentFailed => "Payment processing failed",
            ErrorCode::PaymentInsufficientAmount => "Insufficient payment amount",
            ErrorCode::PaymentInvalidMethod => "Invalid payment method",
            ErrorCode::PaymentInvalidAmount => "Invalid payment amount",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::ProductOutOfStock => "Product is out of stock",
            ErrorCode::ProductInsufficientStock => {
                "Requested quantity exceeds available stock"
            }
            ErrorCode::ProductInactive => "Product is deactivated",

            // Promotion
            ErrorCode::PromotionNotFound => "Promotion not found",
            ErrorCode::PromotionInactive => "Promotion is deactivated",
            ErrorCode::PromotionExpired => "Promotion is outside its validity window",

            // Caisse session
            ErrorCode::SessionNotFound => "Caisse session not found",
            ErrorCode::SessionAlreadyActive => "An active caisse session already exists",
            ErrorCode::SessionAlreadyClosed => "Caisse session is already closed",
            ErrorCode::SessionNotActive => "Caisse session is not active",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Agency
            3001 => Ok(ErrorCode::AgencyNotFound),
            3002 => Ok(ErrorCode::AgencyInactive),

            // Sale
            4001 => Ok(ErrorCode::SaleNotFound),
            4002 => Ok(ErrorCode::CartEmpty),
            4003 => Ok(ErrorCode::CartLineNotFound),
            4101 => Ok(ErrorCode::CustomerNotFound),

            // Payment
            5001 => Ok(ErrorCode::PaymentFailed),
            5002 => Ok(ErrorCode::PaymentInsufficientAmount),
            5003 => Ok(ErrorCode::PaymentInvalidMethod),
            5004 => Ok(ErrorCode::PaymentInvalidAmount),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6003 => Ok(ErrorCode::ProductOutOfStock),
            6004 => Ok(ErrorCode::ProductInsufficientStock),
            6005 => Ok(ErrorCode::ProductInactive),

            // Promotion
            7001 => Ok(ErrorCode::PromotionNotFound),
            7002 => Ok(ErrorCode::PromotionInactive),
            7003 => Ok(ErrorCode::PromotionExpired),

            // Caisse session
            8001 => Ok(ErrorCode::SessionNotFound),
            8002 => Ok(ErrorCode::SessionAlreadyActive),
            8003 => Ok(ErrorCode::SessionAlreadyClosed),
            8004 => Ok(ErrorCode::SessionNotActive),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
