//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/health | GET | 健康检查 (含账本检查) |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "status": "healthy",
//!   "version": "0.1.0",
//!   "uptime_seconds": 42,
//!   "ledger": "ok"
//! }
//! ```

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::core::ServerState;

/// 健康检查路由 - 公共路由
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (healthy | degraded)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒, 自状态初始化)
    uptime_seconds: u64,
    /// 账本检查 (ok | error)
    ledger: &'static str,
    /// 账本错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    ledger_error: Option<String>,
}

/// 健康检查：账本可读即视为健康
pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let (ledger, ledger_error) = match state.ledger.load().await {
        Ok(_) => ("ok", None),
        Err(e) => ("error", Some(e.to_string())),
    };

    Json(HealthResponse {
        status: if ledger == "ok" { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        ledger,
        ledger_error,
    })
}
