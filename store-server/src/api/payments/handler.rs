//! Payment API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use shared::request::{
    CheckoutRequest, CheckoutResponse, VerifyRequest, VerifyResponse, WebhookAck,
    WebhookNotification,
};

use crate::core::ServerState;
use crate::utils::AppResult;

/// POST /api/payments/create-order - 创建待支付订单和网关支付会话
pub async fn create_order(
    State(state): State<ServerState>,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    payload.validate()?;
    let (order, session) = state.checkout_manager().create(&payload).await?;
    Ok(Json(CheckoutResponse {
        success: true,
        order_id: order.order_id,
        payment_session_id: session.payment_session_id,
    }))
}

/// POST /api/payments/verify-payment - 主动对账
pub async fn verify_payment(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    payload.validate()?;
    let (succeeded, order) = state.checkout_manager().verify(&payload.order_id).await?;
    Ok(Json(VerifyResponse {
        succeeded,
        status: order.status,
        order,
    }))
}

/// POST /api/payments/webhook - 网关 webhook
///
/// 无论对账结果如何都返回 200 ack, 否则网关会持续重投;
/// 处理失败只记日志。
pub async fn webhook(
    State(state): State<ServerState>,
    Json(payload): Json<WebhookNotification>,
) -> Json<WebhookAck> {
    if let Err(e) = state.checkout_manager().reconcile_webhook(&payload).await {
        tracing::error!(
            order_id = %payload.order_id,
            error = %e,
            "webhook reconciliation failed"
        );
    }
    Json(WebhookAck { success: true })
}
