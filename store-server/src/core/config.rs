use std::path::PathBuf;

/// 服务器配置 - 订单服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (账本文件所在) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | PUBLIC_ORIGIN | http://localhost:3000 | 回跳 URL 的兜底 origin |
/// | ENVIRONMENT | development | 运行环境 |
/// | PAYMENT_API_URL | http://localhost:4242 | 支付提供商 API 地址 |
/// | PAYMENT_SECRET_KEY | sk_test_dev | 支付提供商密钥 |
/// | PAYMENT_WEBHOOK_SECRET | whsec_dev | webhook 签名共享密钥 |
/// | PAYMENT_CURRENCY | usd | 结算货币 |
/// | WEBHOOK_TOLERANCE_SECS | 300 | webhook 时间戳容忍窗口(秒) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/store HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储账本文件、日志等
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 请求未携带 Origin 头时使用的兜底 origin
    pub public_origin: String,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 支付提供商配置
    pub payment: PaymentConfig,
}

/// 支付提供商配置
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// 提供商 API base URL
    pub api_url: String,
    /// API 密钥 (Bearer)
    pub secret_key: String,
    /// webhook 签名共享密钥
    pub webhook_secret: String,
    /// 结算货币 (ISO 4217 小写)
    pub currency: String,
    /// webhook 时间戳容忍窗口 (秒)
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    fn from_env() -> Self {
        Self {
            api_url: std::env::var("PAYMENT_API_URL")
                .unwrap_or_else(|_| "http://localhost:4242".into()),
            secret_key: std::env::var("PAYMENT_SECRET_KEY")
                .unwrap_or_else(|_| "sk_test_dev".into()),
            webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET")
                .unwrap_or_else(|_| "whsec_dev".into()),
            currency: std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "usd".into()),
            webhook_tolerance_secs: std::env::var("WEBHOOK_TOLERANCE_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            public_origin: std::env::var("PUBLIC_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            payment: PaymentConfig::from_env(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 账本目录 (work_dir)
    pub fn ledger_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir)
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.ledger_dir())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
