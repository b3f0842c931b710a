//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`products`] - 商品目录接口
//! - [`orders`] - 订单接口
//! - [`payments`] - 支付会话 / 对账接口
//! - [`subscriptions`] - 邮件订阅接口

pub mod health;
pub mod orders;
pub mod payments;
pub mod products;
pub mod subscriptions;
