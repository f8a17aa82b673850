//! 支付提供商集成
//!
//! - [`client`] - 支付会话创建 (HTTP 客户端)
//! - [`webhook`] - 回调签名校验与事件解析

pub mod client;
pub mod webhook;

pub use client::{CheckoutClient, CheckoutSession, SessionLineItem};
pub use webhook::{SignatureVerifier, WebhookEvent, EVENT_PAYMENT_FAILED, EVENT_SESSION_COMPLETED};
