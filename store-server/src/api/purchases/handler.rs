//! Purchases API Handlers

use axum::{extract::State, Json};

use crate::core::ServerState;
use crate::utils::AppResult;
use shared::models::OrderRecord;

/// GET /api/purchases - 获取全部订单记录
///
/// 按账本插入顺序原样返回；文件缺失返回空数组 (200)。
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderRecord>>> {
    let records = state.ledger.load().await?;
    tracing::debug!(count = records.len(), "Purchases listed");
    Ok(Json(records))
}
