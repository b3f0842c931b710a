use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::checkout::CheckoutManager;
use crate::core::Config;
use crate::db::DbService;
use crate::gateway::{CashfreeGateway, PaymentGateway};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，Clone 成本极低；所有业务状态都落在
/// 嵌入式数据库里，进程内不保留权威可变状态。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | gateway | Arc<dyn PaymentGateway> | 支付网关客户端 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 支付网关客户端
    pub gateway: Arc<dyn PaymentGateway>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试场景用它注入
    /// 内存数据库和 mock 网关。
    pub fn new(config: Config, db: Surreal<Db>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            config,
            db,
            gateway,
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/luxe.db)，含索引定义和目录种子数据
    /// 3. 支付网关客户端
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("luxe.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        // 2. Initialize payment gateway client
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(CashfreeGateway::new(config.gateway.clone()));

        if !config.gateway.is_configured() {
            tracing::warn!(
                "Cashfree credentials not set; payment endpoints will return PaymentNotConfigured"
            );
        }

        Ok(Self::new(config.clone(), db_service.db, gateway))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 构造订单生命周期管理器
    pub fn checkout_manager(&self) -> CheckoutManager {
        CheckoutManager::new(self.db.clone(), self.gateway.clone())
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
