//! Unified error codes for the storefront backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Product errors
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

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order already reached a terminal state
    OrderAlreadyFinalized = 4002,
    /// Order has no items
    OrderEmpty = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment gateway returned an error or is unreachable
    PaymentGatewayError = 5001,
    /// Payment gateway credentials missing
    PaymentNotConfigured = 5002,
    /// Payment verification failed at the gateway
    PaymentVerificationFailed = 5003,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyFinalized => "Order already finalized",
            Self::OrderEmpty => "Order must include items",

            Self::PaymentGatewayError => "Payment gateway error",
            Self::PaymentNotConfigured => "Payment gateway not configured",
            Self::PaymentVerificationFailed => "Payment verification failed",

            Self::ProductNotFound => "Product not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }

    /// Whether a caller retry can reasonably succeed
    ///
    /// Only transient gateway conditions qualify. Validation and
    /// not-found errors are deterministic for a given request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PaymentGatewayError)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
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
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderAlreadyFinalized),
            4003 => Ok(Self::OrderEmpty),
            5001 => Ok(Self::PaymentGatewayError),
            5002 => Ok(Self::PaymentNotConfigured),
            5003 => Ok(Self::PaymentVerificationFailed),
            6001 => Ok(Self::ProductNotFound),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::DatabaseError),
            other => Err(InvalidErrorCode(other)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), *self as u16)
    }
}
