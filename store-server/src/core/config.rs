use std::path::PathBuf;

/// Cashfree 网关配置
///
/// 凭证缺失时允许启动，但任何支付操作都会以
/// `PaymentNotConfigured` 失败。
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Cashfree PG API 地址 (默认 sandbox)
    pub api_url: String,
    /// x-client-id 凭证
    pub app_id: Option<String>,
    /// x-client-secret 凭证
    pub secret_key: Option<String>,
    /// 支付完成后买家浏览器跳转的前端地址
    pub return_url_base: String,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("CASHFREE_API_URL")
                .unwrap_or_else(|_| "https://sandbox.cashfree.com/pg".into()),
            app_id: std::env::var("CASHFREE_APP_ID").ok().filter(|v| !v.is_empty()),
            secret_key: std::env::var("CASHFREE_SECRET_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            return_url_base: std::env::var("RETURN_URL_BASE")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
        }
    }

    /// 凭证是否齐全
    pub fn is_configured(&self) -> bool {
        self.app_id.is_some() && self.secret_key.is_some()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_url: "https://sandbox.cashfree.com/pg".into(),
            app_id: None,
            secret_key: None,
            return_url_base: "http://localhost:8080".into(),
        }
    }
}

/// 服务器配置 - 商城后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/luxe/store | 工作目录 |
/// | HTTP_PORT | 4000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CASHFREE_API_URL | https://sandbox.cashfree.com/pg | 网关 API 地址 |
/// | CASHFREE_APP_ID | - | 网关凭证 |
/// | CASHFREE_SECRET_KEY | - | 网关凭证 |
/// | RETURN_URL_BASE | http://localhost:8080 | 前端回跳地址 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/luxe HTTP_PORT=4100 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 支付网关配置
    pub gateway: GatewayConfig,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/luxe/store".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(4000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            gateway: GatewayConfig::from_env(),
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

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(PathBuf::from(&self.work_dir).join("logs"))?;
        Ok(())
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
