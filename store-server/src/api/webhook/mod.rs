//! Webhook API 模块

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub use handler::{WebhookAck, SIGNATURE_HEADER};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/webhook", post(handler::receive))
}
