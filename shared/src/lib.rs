//! Shared types for the storefront server
//!
//! Common types used across crates: the order record data model,
//! checkout cart types, and the unified error/response framework.

pub mod error;
pub mod models;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{CartLine, CustomerInfo, OrderRecord, OrderedProduct, PaymentStatus};
