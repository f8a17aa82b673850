//! Flat-file storage for order records
//!
//! # Layout
//!
//! 单一 JSON 文件 (`work_dir/orders.json`)，顶层是 OrderRecord 数组，
//! 按插入顺序排列，无 schema 版本字段。文件缺失等价于空序列。
//!
//! # Durability
//!
//! 每次变更序列化整个记录序列，先写临时文件再原子 rename，
//! 避免写一半的文件出现在磁盘上。
//!
//! # Concurrency
//!
//! 所有写操作 (append / update) 在同一个 `tokio::sync::Mutex`
//! 临界区内完成 read-modify-write，消除进程内的 lost-update 竞争。
//! 读操作不取锁：rename 的原子性保证读到的总是完整文件。

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;

use shared::models::{OrderRecord, PaymentStatus};
use shared::AppError;

/// Ledger file name under the work dir
pub const LEDGER_FILE: &str = "orders.json";

/// Storage errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Order {0} not found")]
    NotFound(String),

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Ledger file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Failed to create ledger directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read ledger file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write ledger file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::NotFound(id) => AppError::order_not_found(id),
            LedgerError::IllegalTransition { .. } => AppError::order_finalized(err.to_string()),
            LedgerError::Corrupt(_) => AppError::corrupt(err.to_string()),
            LedgerError::CreateDir { .. }
            | LedgerError::Read { .. }
            | LedgerError::Write { .. } => AppError::storage(err.to_string()),
        }
    }
}

/// 订单账本 - 订单记录的唯一持久化存储
///
/// 见模块文档。克隆开销低的场景请包在 `Arc` 里共享。
#[derive(Debug)]
pub struct OrderLedger {
    path: PathBuf,
    /// 写临界区：append / update 的 read-modify-write 必须串行
    write_lock: Mutex<()>,
}

impl OrderLedger {
    /// 创建账本实例，文件为 `dir/orders.json`
    ///
    /// 不做 IO；目录和文件按需创建。
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(LEDGER_FILE),
            write_lock: Mutex::new(()),
        }
    }

    /// 账本文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部订单记录 (插入顺序)
    ///
    /// 文件缺失或为空 ⇒ 空序列，不是错误。
    /// 文件存在但解析失败 ⇒ [`LedgerError::Corrupt`]。
    pub async fn load(&self) -> Result<Vec<OrderRecord>, LedgerError> {
        self.read_records().await
    }

    /// 追加一条订单记录
    ///
    /// 重复 `orderId` 是幂等成功：返回 `Ok(false)` 且不改动存储。
    /// 新记录返回 `Ok(true)`。
    pub async fn append(&self, record: OrderRecord) -> Result<bool, LedgerError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        if records.iter().any(|r| r.order_id == record.order_id) {
            tracing::debug!(order_id = %record.order_id, "Duplicate append suppressed");
            return Ok(false);
        }

        records.push(record);
        self.persist(&records).await?;
        Ok(true)
    }

    /// 更新订单支付状态
    ///
    /// 状态迁移校验在临界区内完成：终态粘性，重复同状态幂等。
    /// 每次成功的更新都会刷新 `timestamp`，并在提供 `session_id`
    /// 时写入关联句柄。返回更新后的记录。
    pub async fn update_status(
        &self,
        order_id: &str,
        status: PaymentStatus,
        session_id: Option<String>,
    ) -> Result<OrderRecord, LedgerError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records().await?;
        let record = records
            .iter_mut()
            .find(|r| r.order_id == order_id)
            .ok_or_else(|| LedgerError::NotFound(order_id.to_string()))?;

        if !record.payment_status.can_transition_to(status) {
            return Err(LedgerError::IllegalTransition {
                from: record.payment_status,
                to: status,
            });
        }

        record.payment_status = status;
        if let Some(sid) = session_id {
            record.session_id = Some(sid);
        }
        record.touch();
        let updated = record.clone();

        self.persist(&records).await?;
        Ok(updated)
    }

    /// 读取并反序列化账本文件
    async fn read_records(&self) -> Result<Vec<OrderRecord>, LedgerError> {
        let bytes = match fs::read(&self.path).await {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LedgerError::Read {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// 整文件重写：临时文件 + 原子 rename
    async fn persist(&self, records: &[OrderRecord]) -> Result<(), LedgerError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| LedgerError::CreateDir {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
        }

        // pretty-print 保持文件可人工检查 (与历史格式一致)
        let json = serde_json::to_vec_pretty(records)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| LedgerError::Write {
                path: tmp.clone(),
                source: e,
            })?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| LedgerError::Write {
                path: self.path.clone(),
                source: e,
            })?;

        Ok(())
    }
}
