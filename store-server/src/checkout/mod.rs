//! 订单/支付生命周期
//!
//! 结账流程的核心模块: 金额计算、订单号生成、以及
//! pending → terminal 的对账状态机。

pub mod lifecycle;
pub mod money;
pub mod order_id;

pub use lifecycle::CheckoutManager;
pub use money::order_total;
pub use order_id::new_order_id;
