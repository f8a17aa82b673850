//! 订单账本 - flat-file JSON 订单记录存储
//!
//! 唯一的持久化机制：一个 JSON 数组文件，整文件重写。
//! 所有写入通过 [`OrderLedger`] 的互斥临界区串行化。

mod store;

pub use store::{LedgerError, OrderLedger, LEDGER_FILE};
