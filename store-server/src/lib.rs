//! Storefront Order Server - 在线商店订单后端
//!
//! # 架构概述
//!
//! 本模块是订单记录子系统的主入口，提供以下核心功能：
//!
//! - **订单账本** (`ledger`): 单一 JSON 文件的订单记录存储
//! - **支付集成** (`payments`): 支付会话创建 + webhook 签名校验
//! - **状态对账** (`orders`): 订单支付状态的状态机与对账
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── ledger/        # 订单账本 (flat-file JSON)
//! ├── orders/        # 状态对账
//! ├── payments/      # 支付提供商客户端、webhook 校验
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志等工具
//! ```

pub mod api;
pub mod core;
pub mod ledger;
pub mod orders;
pub mod payments;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use ledger::{LedgerError, OrderLedger};
pub use payments::{CheckoutClient, SignatureVerifier};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}
