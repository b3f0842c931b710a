//! Order Repository
//!
//! Orders are keyed by their externally-visible `order_id` rather than
//! the SurrealDB record id. Status finalization is a compare-and-set on
//! the pending state so concurrent reconciliation paths (manual verify,
//! webhook redelivery) cannot overwrite a terminal outcome.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use shared::models::{Order, OrderStatus};

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order
    pub async fn insert(&self, order: Order) -> RepoResult<Order> {
        let order_id = order.order_id.clone();
        let created: Option<Order> = self
            .base
            .db()
            .create("order")
            .content(order)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("unique_order_id") {
                    RepoError::Duplicate(format!("Order {order_id} already exists"))
                } else {
                    RepoError::Database(msg)
                }
            })?;

        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find an order by its external order id
    pub async fn find_by_order_id(&self, order_id: &str) -> RepoResult<Option<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE order_id = $order_id")
            .bind(("order_id", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Compare-and-set a pending order into a terminal state
    ///
    /// Only `pending → {completed, failed}` is accepted. Returns the
    /// updated order, or `None` when no pending row matched — either the
    /// order does not exist or it already reached a terminal state, in
    /// which case the first terminal write has already won and this call
    /// is a no-op.
    pub async fn finalize(
        &self,
        order_id: &str,
        status: OrderStatus,
        payment_id: Option<String>,
    ) -> RepoResult<Option<Order>> {
        if !status.is_terminal() {
            return Err(RepoError::Validation(format!(
                "finalize requires a terminal status, got {status:?}"
            )));
        }

        let updated: Vec<Order> = self
            .base
            .db()
            .query(
                "UPDATE order SET status = $status, payment_id = $payment_id \
                 WHERE order_id = $order_id AND status = 'pending' RETURN AFTER",
            )
            .bind(("status", status))
            .bind(("payment_id", payment_id))
            .bind(("order_id", order_id.to_string()))
            .await?
            .take(0)?;

        Ok(updated.into_iter().next())
    }

    /// Count all persisted orders (test support / statistics)
    pub async fn count(&self) -> RepoResult<usize> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }

        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM order GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }
}
