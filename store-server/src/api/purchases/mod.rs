//! Purchases API 模块
//!
//! 订单记录的只读列表。所有写入走 payment/webhook 路径。

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/purchases", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
