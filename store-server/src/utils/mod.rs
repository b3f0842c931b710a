//! 工具模块 - 日志与校验工具
//!
//! 错误类型统一来自 `shared::error`，这里做 re-export 方便内部引用。

pub mod logger;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use validation::normalize_email;
