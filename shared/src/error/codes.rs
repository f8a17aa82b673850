//! Unified error codes for the storefront server
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Payment / webhook errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient
/// serialization and cross-language compatibility (Rust, TypeScript).
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
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Order ====================
    /// Order record not found in the ledger
    OrderNotFound = 4001,
    /// Order already reached a terminal payment status
    OrderAlreadyFinalized = 4002,
    /// Requested payment status value is not valid
    InvalidOrderStatus = 4003,

    // ==================== 5xxx: Payment ====================
    /// Payment provider rejected or failed the session request
    PaymentSessionFailed = 5001,
    /// Webhook signature missing or invalid
    WebhookSignatureInvalid = 5002,
    /// Webhook payload could not be parsed
    WebhookPayloadInvalid = 5003,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Ledger storage read/write failure
    StorageError = 9002,
    /// Ledger file exists but does not parse
    StorageCorrupt = 9003,
    /// Configuration error
    ConfigError = 9004,
    /// Network error (upstream connection)
    NetworkError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field missing",

            Self::OrderNotFound => "Order not found",
            Self::OrderAlreadyFinalized => "Order already finalized",
            Self::InvalidOrderStatus => "Invalid order status",

            Self::PaymentSessionFailed => "Payment session creation failed",
            Self::WebhookSignatureInvalid => "Webhook signature invalid",
            Self::WebhookPayloadInvalid => "Webhook payload invalid",

            Self::InternalError => "Internal server error",
            Self::StorageError => "Storage error",
            Self::StorageCorrupt => "Storage file is corrupt",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Success),
            1 => Ok(Self::Unknown),
            2 => Ok(Self::ValidationFailed),
            3 => Ok(Self::NotFound),
            4 => Ok(Self::AlreadyExists),
            5 => Ok(Self::InvalidRequest),
            7 => Ok(Self::RequiredField),
            4001 => Ok(Self::OrderNotFound),
            4002 => Ok(Self::OrderAlreadyFinalized),
            4003 => Ok(Self::InvalidOrderStatus),
            5001 => Ok(Self::PaymentSessionFailed),
            5002 => Ok(Self::WebhookSignatureInvalid),
            5003 => Ok(Self::WebhookPayloadInvalid),
            9001 => Ok(Self::InternalError),
            9002 => Ok(Self::StorageError),
            9003 => Ok(Self::StorageCorrupt),
            9004 => Ok(Self::ConfigError),
            9005 => Ok(Self::NetworkError),
            other => Err(format!("unknown error code: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderAlreadyFinalized,
            ErrorCode::PaymentSessionFailed,
            ErrorCode::WebhookSignatureInvalid,
            ErrorCode::StorageError,
            ErrorCode::StorageCorrupt,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_serde_as_u16() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ErrorCode::OrderNotFound);
    }
}
