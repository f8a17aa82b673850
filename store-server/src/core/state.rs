use std::sync::Arc;
use std::time::Instant;

use crate::core::Config;
use crate::ledger::OrderLedger;
use crate::payments::{CheckoutClient, SignatureVerifier};

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是订单服务的核心数据结构。使用 Arc 实现浅拷贝，
/// 每个请求处理器拿到的都是同一组服务实例。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | ledger | Arc<OrderLedger> | 订单账本 (唯一共享可变资源) |
/// | checkout | Arc<CheckoutClient> | 支付提供商客户端 |
/// | webhook | Arc<SignatureVerifier> | webhook 签名校验器 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单账本 — 所有写入通过同一个临界区串行化
    pub ledger: Arc<OrderLedger>,
    /// 支付提供商客户端
    pub checkout: Arc<CheckoutClient>,
    /// webhook 签名校验器
    pub webhook: Arc<SignatureVerifier>,
    /// 状态初始化时刻，健康检查据此计算运行时间
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 订单账本 (work_dir/orders.json)
    /// 3. 支付客户端与 webhook 校验器
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure()?;

        // 1. Order ledger
        let ledger = Arc::new(OrderLedger::new(config.ledger_dir()));

        // 2. Payment services
        let checkout = Arc::new(CheckoutClient::new(&config.payment));
        let webhook = Arc::new(SignatureVerifier::new(
            &config.payment.webhook_secret,
            config.payment.webhook_tolerance_secs,
        ));

        Ok(Self {
            config: config.clone(),
            ledger,
            checkout,
            webhook,
            started_at: Instant::now(),
        })
    }
}
