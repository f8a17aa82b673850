//! 统一错误处理
//!
//! 错误类型定义在 `shared::error`，这里统一 re-export，
//! handler 一律使用 [`AppResult`] 作为返回类型。

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
