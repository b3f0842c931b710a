//! API request and response payloads
//!
//! Inbound payloads carry `validator` rules; handlers must call
//! `payload.validate()` before acting on them. Untyped or best-effort
//! coercion of request bodies is deliberately not supported.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Order, OrderStatus};

// =============================================================================
// Checkout / Payments
// =============================================================================

/// One cart line in a checkout request
///
/// Only product id and quantity come from the client; prices are always
/// resolved server-side against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutItem {
    #[validate(length(min = 1, message = "product_id must not be empty"))]
    pub product_id: String,
    #[validate(range(min = 1, max = 9999, message = "quantity out of range"))]
    pub quantity: i32,
}

/// Create-order / payment-session request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "order must include items"))]
    #[validate(nested)]
    pub items: Vec<CheckoutItem>,
    #[validate(length(max = 200))]
    pub customer: Option<String>,
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    /// 直接下单时的支付方式 (如 cod); 网关结账忽略该字段
    #[validate(length(max = 100))]
    pub payment_method: Option<String>,
}

/// Create-order response: the client hands `payment_session_id` to the
/// gateway's hosted checkout UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: String,
    pub payment_session_id: String,
}

/// Manual payment verification request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "order_id required"))]
    pub order_id: String,
}

/// Payment verification response, reflecting post-reconciliation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub succeeded: bool,
    /// Recorded order status after reconciliation
    pub status: OrderStatus,
    pub order: Order,
}

/// Gateway-pushed webhook notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookNotification {
    pub order_id: String,
    /// Gateway status vocabulary; "SUCCESS" is the sole success marker
    pub payment_status: String,
}

/// Webhook acknowledgment; always successful to stop gateway redelivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub success: bool,
}

// =============================================================================
// Subscriptions
// =============================================================================

/// Newsletter subscription request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email(message = "Please enter a valid email address"))]
    #[validate(length(max = 254))]
    pub email: String,
}

/// Newsletter subscription response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub is_already_subscribed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn empty_cart_fails_validation() {
        let req = CheckoutRequest {
            items: vec![],
            customer: None,
            email: None,
            phone: None,
            address: None,
            payment_method: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let req = CheckoutRequest {
            items: vec![CheckoutItem {
                product_id: "product:p1".into(),
                quantity: 0,
            }],
            customer: None,
            email: None,
            phone: None,
            address: None,
            payment_method: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn bad_email_fails_subscription() {
        let req = SubscribeRequest {
            email: "not-an-email".into(),
        };
        assert!(req.validate().is_err());

        let req = SubscribeRequest {
            email: "shopper@example.com".into(),
        };
        assert!(req.validate().is_ok());
    }
}
