//! Payment API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/payments/create-order | POST | 创建待支付订单 + 网关会话 |
//! | /api/payments/verify-payment | POST | 买家回跳后的主动对账 |
//! | /api/payments/webhook | POST | 网关推送的被动对账, 恒定 ack |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", payment_routes())
}

fn payment_routes() -> Router<ServerState> {
    Router::new()
        .route("/create-order", post(handler::create_order))
        .route("/verify-payment", post(handler::verify_payment))
        .route("/webhook", post(handler::webhook))
}
