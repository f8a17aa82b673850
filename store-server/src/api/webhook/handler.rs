//! Webhook API Handlers
//!
//! 接收支付提供商的异步回调。验签通过并完成分发后总是确认收到
//! (`{received:true}`)，即使对账遇到未知订单或过期事件 ——
//! 应用层的对账问题不应触发提供商的重试风暴。账本 IO 失败例外，
//! 以 5xx 返回让提供商稍后重投。

use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;

use crate::core::ServerState;
use crate::ledger::LedgerError;
use crate::orders;
use crate::payments::webhook::{SessionObject, EVENT_PAYMENT_FAILED, EVENT_SESSION_COMPLETED};
use crate::utils::{AppError, AppResult};
use shared::models::PaymentStatus;

/// 签名头名称
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// 回调确认响应
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// POST /api/webhook - 接收提供商回调
///
/// 原始 body 参与验签，必须在任何 JSON 解析之前校验。
pub async fn receive(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> AppResult<Json<WebhookAck>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::signature("Missing webhook signature header"))?;

    let event = state.webhook.construct_event(body.as_bytes(), signature)?;

    match event.event_type.as_str() {
        EVENT_SESSION_COMPLETED => {
            reconcile(&state, &event.data.object, PaymentStatus::Completed).await?;
        }
        EVENT_PAYMENT_FAILED => {
            reconcile(&state, &event.data.object, PaymentStatus::Failed).await?;
        }
        other => {
            // 未识别的事件类型：确认收到但不处理
            tracing::debug!(event_type = %other, "Unhandled webhook event type");
        }
    }

    Ok(Json(WebhookAck { received: true }))
}

/// 把回调结果对账到账本
///
/// 未知订单和冲突迁移记日志后仍然确认；存储 IO 失败向上传播。
async fn reconcile(
    state: &ServerState,
    session: &SessionObject,
    status: PaymentStatus,
) -> AppResult<()> {
    let Some(order_id) = session.order_id() else {
        tracing::warn!(session_id = %session.id, "Webhook session carries no orderId metadata");
        return Ok(());
    };

    match orders::set_status(
        &state.ledger,
        order_id,
        status,
        Some(session.id.clone()),
    )
    .await
    {
        Ok(_) => Ok(()),
        // 对账层面的问题不向提供商报错，避免无意义的重投
        Err(LedgerError::NotFound(_)) | Err(LedgerError::IllegalTransition { .. }) => Ok(()),
        Err(e) => Err(e.into()),
    }
}
