//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use shared::models::Order;
use shared::request::CheckoutRequest;

use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/orders - 直接下单 (不创建支付会话)
pub async fn place(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<Order>> {
    payload.validate()?;
    let order = state.checkout_manager().place_direct(&payload).await?;
    Ok(Json(order))
}

/// GET /api/orders/:order_id - 按外部订单号查询订单
pub async fn get_by_order_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.checkout_manager().find(&order_id).await?;
    Ok(Json(order))
}
