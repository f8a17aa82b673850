//! Status Reconciliation
//!
//! 客户端回跳和支付提供商的 webhook 回调会竞争调用这里：
//! 两条路径都必须可以用相同的终态重复调用 (幂等)。
//! 冲突的迁移 (如 completed 之后再来 failed) 由账本在临界区内
//! 按「终态粘性」策略拒绝，这里只负责记日志并向上传播。

use shared::models::{OrderRecord, PaymentStatus};

use crate::ledger::{LedgerError, OrderLedger};

/// 将订单记录的支付状态与权威结果对账
///
/// - 未知 `order_id` ⇒ [`LedgerError::NotFound`]
/// - 非法迁移 (终态回退) ⇒ [`LedgerError::IllegalTransition`]
/// - 重复的相同状态 ⇒ 幂等成功，刷新 `timestamp`
pub async fn set_status(
    ledger: &OrderLedger,
    order_id: &str,
    status: PaymentStatus,
    session_id: Option<String>,
) -> Result<OrderRecord, LedgerError> {
    let result = ledger.update_status(order_id, status, session_id).await;

    match &result {
        Ok(record) => {
            tracing::info!(
                order_id = %order_id,
                status = %record.payment_status,
                "Order status reconciled"
            );
        }
        Err(LedgerError::IllegalTransition { from, to }) => {
            tracing::warn!(
                order_id = %order_id,
                from = %from,
                to = %to,
                "Conflicting status update rejected (terminal status is sticky)"
            );
        }
        Err(e) => {
            tracing::warn!(order_id = %order_id, error = %e, "Status reconciliation failed");
        }
    }

    result
}
