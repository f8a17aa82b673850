//! Retrieve Session API 模块
//!
//! 成功页回跳后的会话代理：客户端带着 `session_id` 查询参数来取
//! 提供商的会话详情，再据此组装并保存订单记录。密钥留在服务端，
//! 客户端永远不直接接触提供商。

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct RetrieveSessionQuery {
    #[serde(default)]
    pub session_id: Option<String>,
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/retrieve-session", get(retrieve))
}

/// GET /api/retrieve-session?session_id=... - 取回结账会话
///
/// 会话对象原样透传；提供商侧的失败映射为上游错误 (500)。
pub async fn retrieve(
    State(state): State<ServerState>,
    Query(query): Query<RetrieveSessionQuery>,
) -> AppResult<Json<serde_json::Value>> {
    let session_id = query
        .session_id
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::required("session_id"))?;

    let session = state.checkout.retrieve_session(&session_id).await?;
    Ok(Json(session))
}
