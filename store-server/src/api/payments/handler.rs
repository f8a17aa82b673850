//! Payment Record API Handlers

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::core::ServerState;
use crate::orders;
use crate::utils::{ApiResponse, AppError, AppResult};
use shared::models::{OrderRecord, PaymentStatus};

/// POST /api/payment/save - 保存订单记录
///
/// 重复的 `orderId` 是幂等成功 (视为已记录)，不报错。
pub async fn save(
    State(state): State<ServerState>,
    Json(record): Json<OrderRecord>,
) -> AppResult<Json<ApiResponse<()>>> {
    record
        .validate_for_create()
        .map_err(AppError::validation)?;

    let order_id = record.order_id.clone();
    let inserted = state.ledger.append(record).await?;

    if inserted {
        tracing::info!(order_id = %order_id, "Order record saved");
    } else {
        tracing::info!(order_id = %order_id, "Order record already exists, save skipped");
    }

    Ok(Json(ApiResponse::ok_with_message(
        "Payment data saved successfully",
    )))
}

/// 状态更新请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub order_id: String,
    pub status: PaymentStatus,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// POST /api/payment/update-status - 更新订单支付状态
///
/// 客户端回跳路径：支付成功页面回跳后调用。与 webhook 路径
/// 竞争是安全的 —— 相同终态幂等，冲突迁移返回 409。
pub async fn update_status(
    State(state): State<ServerState>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    if payload.order_id.trim().is_empty() {
        return Err(AppError::required("orderId"));
    }

    orders::set_status(
        &state.ledger,
        &payload.order_id,
        payload.status,
        payload.session_id,
    )
    .await?;

    Ok(Json(ApiResponse::ok_with_message(
        "Payment status updated successfully",
    )))
}
