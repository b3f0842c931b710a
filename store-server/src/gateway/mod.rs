//! Payment gateway client
//!
//! The lifecycle manager consumes the [`PaymentGateway`] trait; the
//! production implementation talks to the Cashfree PG REST API. The
//! gateway's own status vocabulary is the sole authority on payment
//! outcome — local state is never used to infer success.

pub mod cashfree;

pub use cashfree::CashfreeGateway;

use async_trait::async_trait;

use crate::utils::AppResult;

/// Buyer contact details forwarded to the hosted checkout
#[derive(Debug, Clone, Default)]
pub struct CustomerContact {
    pub customer: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A remote payment session for one payable order
#[derive(Debug, Clone)]
pub struct GatewaySession {
    /// Token the buyer's browser hands to the hosted checkout UI
    pub payment_session_id: String,
}

/// Authoritative session status as reported by the gateway
#[derive(Debug, Clone)]
pub struct GatewayStatus {
    /// True only when the gateway reports the order as paid
    pub paid: bool,
    /// External payment identifier, when the gateway provides one
    pub payment_id: Option<String>,
}

/// External payment processor contract
///
/// Both operations fail with a gateway error on misconfiguration,
/// transport failure or a non-2xx processor response.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted payment session for an order
    async fn create_session(
        &self,
        order_id: &str,
        amount: f64,
        contact: &CustomerContact,
    ) -> AppResult<GatewaySession>;

    /// Query the current status of an order's payment session
    async fn session_status(&self, order_id: &str) -> AppResult<GatewayStatus>;
}
