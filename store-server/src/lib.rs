//! Luxe Store Server - storefront backend
//!
//! # 架构概述
//!
//! 本模块是商城后端的主入口，提供以下核心功能：
//!
//! - **商品目录** (`db`): 嵌入式 SurrealDB 存储
//! - **订单生命周期** (`checkout`): 创建、核验、webhook 对账
//! - **支付网关** (`gateway`): Cashfree 托管收银台集成
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层 (models + repositories)
//! ├── gateway/       # 支付网关客户端
//! ├── checkout/      # 订单生命周期管理
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、校验等工具
//! ```

pub mod api;
pub mod checkout;
pub mod core;
pub mod db;
pub mod gateway;
pub mod utils;

// Re-export 公共类型
pub use checkout::CheckoutManager;
pub use core::{Config, Server, ServerState};
pub use gateway::{CashfreeGateway, PaymentGateway};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __
   / /   __  ___  _____
  / /   / / / / |/_/ _ \
 / /___/ /_/ />  </  __/
/_____/\__,_/_/|_|\___/
   _____ __
  / ___// /_____  ________
  \__ \/ __/ __ \/ ___/ _ \
 ___/ / /_/ /_/ / /  /  __/
/____/\__/\____/_/   \___/
    "#
    );
}
