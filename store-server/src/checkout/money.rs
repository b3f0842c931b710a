//! 金额计算
//!
//! 存储层金额用 f64, 计算一律走 Decimal, 两位小数,
//! 四舍五入采用 MidpointAwayFromZero (0.005 进位而非银行家舍入)。

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::OrderItem;

use crate::utils::{AppError, AppResult};

/// 税率 10%
fn tax_rate() -> Decimal {
    Decimal::new(10, 2)
}

/// f64 金额转 Decimal, 拒绝 NaN / 无穷 / 负数
pub fn to_decimal(value: f64) -> AppResult<Decimal> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("invalid amount: {value}")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| AppError::validation(format!("amount out of range: {value}")))
}

/// 按两位小数四舍五入
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal 转回 f64 用于存储
pub fn to_f64(value: Decimal) -> AppResult<f64> {
    value
        .to_f64()
        .ok_or_else(|| AppError::internal("amount conversion failed"))
}

/// 计算订单总额: sum(单价 × 数量) × (1 + 税率), 两位小数
///
/// 单价来自目录快照, 数量已通过请求校验 (1..=9999)。
pub fn order_total(items: &[OrderItem]) -> AppResult<f64> {
    let mut subtotal = Decimal::ZERO;
    for item in items {
        if item.quantity <= 0 {
            return Err(AppError::validation(format!(
                "invalid quantity for {}: {}",
                item.product_id, item.quantity
            )));
        }
        let unit = to_decimal(item.unit_price)?;
        subtotal += unit * Decimal::from(item.quantity);
    }

    let total = round2(subtotal * (Decimal::ONE + tax_rate()));
    to_f64(total)
}
