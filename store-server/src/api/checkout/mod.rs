//! Checkout API 模块

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub use handler::{CheckoutRequest, CheckoutResponse};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", post(handler::create_session))
}
