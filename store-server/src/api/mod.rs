//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`checkout`] - 创建支付会话
//! - [`payments`] - 订单记录保存与状态更新
//! - [`purchases`] - 订单记录列表 (只读)
//! - [`retrieve_session`] - 结账会话查询代理
//! - [`webhook`] - 支付提供商回调接收

pub mod checkout;
pub mod health;
pub mod payments;
pub mod purchases;
pub mod retrieve_session;
pub mod webhook;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
