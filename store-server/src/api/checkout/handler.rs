//! Checkout API Handlers

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::models::{CartLine, CustomerInfo};

/// Checkout 请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub items: Vec<CartLine>,
    pub customer_info: CustomerInfo,
}

/// Checkout 响应：提供商会话 ID，客户端据此跳转
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: String,
}

/// POST /api/checkout - 创建支付会话
///
/// 校验在任何上游调用之前完成；回跳 URL 从请求 Origin 头推导，
/// 没有 Origin 时退回配置的 PUBLIC_ORIGIN。
pub async fn create_session(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    validate(&payload)?;

    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(&state.config.public_origin)
        .trim_end_matches('/')
        .to_string();

    let session = state
        .checkout
        .create_session(&payload.items, &payload.customer_info, &origin)
        .await?;

    Ok(Json(CheckoutResponse { id: session.id }))
}

/// 请求体存在性校验 (无格式校验)
fn validate(payload: &CheckoutRequest) -> Result<(), AppError> {
    if payload.items.is_empty() {
        return Err(AppError::validation("items must not be empty"));
    }
    if let Some(item) = payload.items.iter().find(|i| i.quantity < 1) {
        return Err(
            AppError::validation(format!("item '{}' has invalid quantity", item.title))
                .with_detail("item", item.title.clone()),
        );
    }
    if let Some(field) = payload.customer_info.missing_field() {
        return Err(AppError::required(field));
    }
    Ok(())
}
