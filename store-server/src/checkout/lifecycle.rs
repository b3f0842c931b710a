//! 订单生命周期管理器
//!
//! 结账的三条路径都收敛在这里:
//!
//! 1. `create` — 校验购物车、按目录快照定价、落库 pending 订单、
//!    向网关申请支付会话
//! 2. `verify` — 买家回跳后的主动对账, 以网关状态为准
//! 3. `reconcile_webhook` — 网关推送的被动对账
//!
//! verify 与 webhook 可能并发到达且结论可能相反 (超时重试等),
//! 终态写入走数据库 CAS: 第一个终态写入获胜, 之后全部是 no-op。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{Order, OrderItem, OrderStatus};
use shared::request::{CheckoutRequest, WebhookNotification};
use shared::{AppError, ErrorCode};

use crate::db::repository::{OrderRepository, ProductRepository};
use crate::gateway::{CustomerContact, GatewaySession, PaymentGateway};
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};

use super::{money, new_order_id};

/// 网关 webhook 里表示支付成功的唯一标记
const WEBHOOK_SUCCESS: &str = "SUCCESS";

/// 订单/支付生命周期管理器
///
/// 无内部状态, 每个请求由 [`crate::core::ServerState::checkout_manager`]
/// 现场构造。
pub struct CheckoutManager {
    orders: OrderRepository,
    products: ProductRepository,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutManager {
    pub fn new(db: Surreal<Db>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            products: ProductRepository::new(db),
            gateway,
        }
    }

    /// 解析购物车: 所有商品必须能在目录中找到, 任何一个缺失都在
    /// 写库前整单拒绝; 单价取目录当前价做快照
    async fn resolve_items(&self, request: &CheckoutRequest) -> AppResult<Vec<OrderItem>> {
        if request.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let product = self
                .products
                .find_by_id(&line.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::ProductNotFound,
                        format!("Product {} not found", line.product_id),
                    )
                    .with_detail("product_id", line.product_id.clone())
                })?;

            let product_id = product
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| line.product_id.clone());

            items.push(OrderItem {
                product_id,
                title: product.title,
                brand: product.brand,
                unit_price: product.price,
                quantity: line.quantity,
            });
        }
        Ok(items)
    }

    fn build_order(
        &self,
        request: &CheckoutRequest,
        items: Vec<OrderItem>,
        status: OrderStatus,
    ) -> AppResult<Order> {
        validate_optional_text(&request.customer, "customer", MAX_NAME_LEN)?;
        validate_optional_text(&request.email, "email", MAX_EMAIL_LEN)?;
        validate_optional_text(&request.phone, "phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&request.address, "address", MAX_ADDRESS_LEN)?;

        let total = money::order_total(&items)?;
        Ok(Order {
            order_id: new_order_id(),
            items,
            customer: request.customer.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            address: request.address.clone(),
            payment_method: None,
            total,
            status,
            payment_id: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// 创建待支付订单并向网关申请支付会话
    ///
    /// 订单先落库 (pending), 再调网关。网关失败时不回滚: pending
    /// 订单保留, 后续 verify/webhook 仍可将其对账到终态。
    pub async fn create(&self, request: &CheckoutRequest) -> AppResult<(Order, GatewaySession)> {
        let items = self.resolve_items(request).await?;
        let order = self.build_order(request, items, OrderStatus::Pending)?;
        let order = self.orders.insert(order).await?;

        tracing::info!(
            order_id = %order.order_id,
            total = order.total,
            "order created, requesting payment session"
        );

        let contact = CustomerContact {
            customer: request.customer.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
        };
        let session = self
            .gateway
            .create_session(&order.order_id, order.total, &contact)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    order_id = %order.order_id,
                    error = %e,
                    "payment session creation failed; order stays pending"
                );
            })?;

        Ok((order, session))
    }

    /// 创建直接订单 (不走支付网关, 例如货到付款)
    pub async fn place_direct(&self, request: &CheckoutRequest) -> AppResult<Order> {
        let items = self.resolve_items(request).await?;
        let mut order = self.build_order(request, items, OrderStatus::Created)?;
        order.payment_method = request.payment_method.clone();
        let order = self.orders.insert(order).await?;
        tracing::info!(order_id = %order.order_id, total = order.total, "direct order placed");
        Ok(order)
    }

    /// 查询订单
    pub async fn find(&self, order_id: &str) -> AppResult<Order> {
        validate_required_text(order_id, "order_id", MAX_SHORT_TEXT_LEN)?;
        self.orders
            .find_by_order_id(order_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderNotFound,
                    format!("Order {order_id} not found"),
                )
            })
    }

    /// 主动对账: 询问网关并将 pending 订单推进到终态
    ///
    /// 幂等: 已处于终态的订单直接返回记录结果, 不再访问网关,
    /// 也不会改写已有的 payment_id。返回 (是否支付成功, 订单)。
    pub async fn verify(&self, order_id: &str) -> AppResult<(bool, Order)> {
        let order = self.find(order_id).await?;

        // 终态或无支付会话的订单: 直接返回记录状态
        if order.status != OrderStatus::Pending {
            return Ok((order.status == OrderStatus::Completed, order));
        }

        let status = self.gateway.session_status(order_id).await?;
        let (target, payment_id) = if status.paid {
            (OrderStatus::Completed, status.payment_id)
        } else {
            (OrderStatus::Failed, None)
        };

        match self.orders.finalize(order_id, target, payment_id).await? {
            Some(updated) => {
                tracing::info!(order_id, status = ?updated.status, "payment verified");
                Ok((updated.status == OrderStatus::Completed, updated))
            }
            // CAS 未命中: 另一条对账路径已先写入终态, 以它为准
            None => {
                let winner = self.find(order_id).await?;
                tracing::info!(
                    order_id,
                    status = ?winner.status,
                    "verification lost the race; returning recorded outcome"
                );
                Ok((winner.status == OrderStatus::Completed, winner))
            }
        }
    }

    /// 被动对账: 处理网关 webhook 推送
    ///
    /// 未知订单号与重复投递都静默忽略, 调用方无论如何都应 ack,
    /// 否则网关会持续重投。
    pub async fn reconcile_webhook(&self, notification: &WebhookNotification) -> AppResult<()> {
        let target = if notification.payment_status == WEBHOOK_SUCCESS {
            OrderStatus::Completed
        } else {
            OrderStatus::Failed
        };

        match self
            .orders
            .finalize(&notification.order_id, target, None)
            .await?
        {
            Some(updated) => {
                tracing::info!(
                    order_id = %notification.order_id,
                    status = ?updated.status,
                    "webhook reconciled order"
                );
            }
            None => {
                tracing::warn!(
                    order_id = %notification.order_id,
                    payment_status = %notification.payment_status,
                    "webhook ignored: order unknown or already finalized"
                );
            }
        }
        Ok(())
    }
}
