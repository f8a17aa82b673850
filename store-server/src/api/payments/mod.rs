//! Payment Record API 模块

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub use handler::UpdateStatusRequest;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payment", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/save", post(handler::save))
        .route("/update-status", post(handler::update_status))
}
