//! Cashfree PG integration via REST API (no SDK dependency)

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::config::GatewayConfig;
use crate::utils::{AppError, AppResult};

use super::{CustomerContact, GatewaySession, GatewayStatus, PaymentGateway};

/// Cashfree API 版本, 请求头 x-api-version 要求固定值
const API_VERSION: &str = "2023-08-01";

/// 网关认为已支付的唯一状态值
const STATUS_PAID: &str = "PAID";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cashfree 支付网关客户端
///
/// 封装 PG /orders 接口的两个操作: 创建支付会话与查询订单状态.
/// 凭证缺失时所有操作返回 PaymentNotConfigured, 不发出网络请求.
pub struct CashfreeGateway {
    config: GatewayConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CustomerDetails {
    customer_id: String,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
}

#[derive(Serialize)]
struct OrderMeta {
    return_url: String,
}

#[derive(Serialize)]
struct CreateOrderRequest {
    order_id: String,
    order_amount: f64,
    order_currency: String,
    customer_details: CustomerDetails,
    order_meta: OrderMeta,
}

#[derive(Deserialize)]
struct CreateOrderResponse {
    payment_session_id: Option<String>,
}

#[derive(Deserialize)]
struct OrderStatusResponse {
    order_status: Option<String>,
    /// Cashfree 在不同接口版本里可能返回数字或字符串
    cf_payment_id: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct GatewayErrorBody {
    message: Option<String>,
}

impl CashfreeGateway {
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// 取出凭证, 未配置时直接报错
    fn credentials(&self) -> AppResult<(&str, &str)> {
        match (&self.config.app_id, &self.config.secret_key) {
            (Some(app_id), Some(secret)) => Ok((app_id, secret)),
            _ => Err(AppError::payment_not_configured()),
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/orders", self.config.api_url.trim_end_matches('/'))
    }

    fn return_url(&self, order_id: &str) -> String {
        format!(
            "{}/?view=payment-success&order_id={order_id}",
            self.config.return_url_base.trim_end_matches('/')
        )
    }

    /// 将非 2xx 响应转换为网关错误, 尽量带上网关的 message
    async fn error_from_response(&self, resp: reqwest::Response) -> AppError {
        let status = resp.status();
        let message = match resp.json::<GatewayErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => None,
        };
        match message {
            Some(msg) => AppError::gateway(format!("gateway returned {status}: {msg}")),
            None => AppError::gateway(format!("gateway returned {status}")),
        }
    }
}

#[async_trait]
impl PaymentGateway for CashfreeGateway {
    async fn create_session(
        &self,
        order_id: &str,
        amount: f64,
        contact: &CustomerContact,
    ) -> AppResult<GatewaySession> {
        let (app_id, secret) = self.credentials()?;

        let body = CreateOrderRequest {
            order_id: order_id.to_string(),
            order_amount: amount,
            order_currency: "INR".to_string(),
            customer_details: CustomerDetails {
                customer_id: format!("cust_{order_id}"),
                customer_name: contact.customer.clone().unwrap_or_default(),
                customer_email: contact
                    .email
                    .clone()
                    .unwrap_or_else(|| "guest@example.com".to_string()),
                customer_phone: contact
                    .phone
                    .clone()
                    .unwrap_or_else(|| "9999999999".to_string()),
            },
            order_meta: OrderMeta {
                return_url: self.return_url(order_id),
            },
        };

        let resp = self
            .client
            .post(self.orders_url())
            .header("x-api-version", API_VERSION)
            .header("x-client-id", app_id)
            .header("x-client-secret", secret)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("gateway request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let created: CreateOrderResponse = resp
            .json()
            .await
            .map_err(|e| AppError::gateway(format!("invalid gateway response: {e}")))?;

        match created.payment_session_id {
            Some(payment_session_id) => Ok(GatewaySession { payment_session_id }),
            None => Err(AppError::gateway("gateway response missing session id")),
        }
    }

    async fn session_status(&self, order_id: &str) -> AppResult<GatewayStatus> {
        let (app_id, secret) = self.credentials()?;

        let resp = self
            .client
            .get(format!("{}/{order_id}", self.orders_url()))
            .header("x-api-version", API_VERSION)
            .header("x-client-id", app_id)
            .header("x-client-secret", secret)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("gateway request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }

        let status: OrderStatusResponse = resp
            .json()
            .await
            .map_err(|e| AppError::gateway(format!("invalid gateway response: {e}")))?;

        let paid = status.order_status.as_deref() == Some(STATUS_PAID);
        let payment_id = status.cf_payment_id.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });

        Ok(GatewayStatus { paid, payment_id })
    }
}
