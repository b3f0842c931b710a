//! Order Model
//!
//! An order snapshots product prices at creation time. `total` is fixed
//! once the order is persisted and is never recomputed from the catalog.

use serde::{Deserialize, Serialize};

/// Order status
///
/// `Completed` and `Failed` are terminal: once reached, no further
/// transition is permitted. `Pending` is the only state the payment
/// reconciliation paths may move away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Direct order without a payment session
    Created,
    /// Payment session created, awaiting gateway outcome
    Pending,
    /// Payment confirmed by the gateway
    Completed,
    /// Payment declined or verification failed
    Failed,
}

impl OrderStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Line item snapshot captured at order creation
///
/// Holds a copy of the catalog price, not a live reference, so later
/// catalog edits never change what the buyer was charged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub title: String,
    pub brand: String,
    pub unit_price: f64,
    pub quantity: i32,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Externally visible identifier, unique per payment session
    pub order_id: String,
    pub items: Vec<OrderItem>,
    pub customer: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
    /// Grand total including tax, fixed at creation
    pub total: f64,
    pub status: OrderStatus,
    /// External gateway payment id, set only after a confirmed payment
    pub payment_id: Option<String>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Created.is_terminal());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
    }
}
