//! 订单状态对账
//!
//! 把权威的支付结果 (客户端回跳或 webhook 回调) 同步到账本记录。

mod reconcile;

pub use reconcile::set_status;
