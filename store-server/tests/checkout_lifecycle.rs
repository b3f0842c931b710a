//! 订单生命周期集成测试
//!
//! 使用临时 RocksDB 实例和 mock 网关, 覆盖创建/对账/竞争路径。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::models::OrderStatus;
use shared::request::{CheckoutItem, CheckoutRequest, WebhookNotification};
use shared::{AppError, ErrorCode};

use store_server::CheckoutManager;
use store_server::db::define_schema;
use store_server::db::models::{ProductCategory, ProductCreate};
use store_server::db::repository::{OrderRepository, ProductRepository};
use store_server::gateway::{CustomerContact, GatewaySession, GatewayStatus, PaymentGateway};

/// 可编程 mock 网关
///
/// `paid` 控制 session_status 的结论, `fail_create` 模拟网关宕机,
/// `status_calls` 用来断言幂等路径没有访问网关。
struct MockGateway {
    paid: AtomicBool,
    fail_create: AtomicBool,
    status_calls: AtomicUsize,
}

impl MockGateway {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            paid: AtomicBool::new(true),
            fail_create: AtomicBool::new(false),
            status_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_session(
        &self,
        order_id: &str,
        _amount: f64,
        _contact: &CustomerContact,
    ) -> Result<GatewaySession, AppError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::gateway("gateway unavailable"));
        }
        Ok(GatewaySession {
            payment_session_id: format!("session_{order_id}"),
        })
    }

    async fn session_status(&self, _order_id: &str) -> Result<GatewayStatus, AppError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let paid = self.paid.load(Ordering::SeqCst);
        Ok(GatewayStatus {
            paid,
            payment_id: paid.then(|| "cf_12345".to_string()),
        })
    }
}

async fn test_db() -> (tempfile::TempDir, Surreal<Db>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.db");
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path.to_str().expect("utf8 path"))
        .await
        .expect("open db");
    db.use_ns("luxe").use_db("store").await.expect("ns/db");
    define_schema(&db).await.expect("schema");
    (dir, db)
}

/// 建一个目录商品, 返回 "product:xxx" 形式的 id
async fn seed_product(db: &Surreal<Db>, title: &str, price: f64) -> String {
    let repo = ProductRepository::new(db.clone());
    let product = repo
        .create(ProductCreate {
            title: title.to_string(),
            brand: "Aurelia".to_string(),
            price,
            original_price: None,
            description: None,
            image: None,
            category: ProductCategory::Watches,
            rating: None,
            reviews: None,
            is_new: Some(false),
            is_featured: Some(false),
        })
        .await
        .expect("seed product");
    product.id.expect("record id").to_string()
}

fn cart(lines: &[(&str, i32)]) -> CheckoutRequest {
    CheckoutRequest {
        items: lines
            .iter()
            .map(|(id, qty)| CheckoutItem {
                product_id: id.to_string(),
                quantity: *qty,
            })
            .collect(),
        customer: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        phone: None,
        address: None,
        payment_method: None,
    }
}

#[tokio::test]
async fn create_snapshots_prices_and_opens_session() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    let manager = CheckoutManager::new(db.clone(), gateway);

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, session) = manager.create(&cart(&[(&pid, 2)])).await.expect("create");

    assert!(order.order_id.starts_with("ORD_"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].unit_price, 100.0);
    // 200.00 + 10% 税 = 220.00
    assert!((order.total - 220.0).abs() < 1e-9, "{}", order.total);
    assert_eq!(session.payment_session_id, format!("session_{}", order.order_id));
}

#[tokio::test]
async fn gateway_failure_keeps_pending_order() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    gateway.fail_create.store(true, Ordering::SeqCst);
    let manager = CheckoutManager::new(db.clone(), gateway);

    let pid = seed_product(&db, "Heritage Wallet", 89.0).await;
    let err = manager.create(&cart(&[(&pid, 1)])).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PaymentGatewayError);
    assert!(err.is_retryable());

    // 订单已落库, 留待后续对账
    let orders = OrderRepository::new(db);
    assert_eq!(orders.count().await.unwrap(), 1);
}

#[tokio::test]
async fn empty_cart_writes_nothing() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    let err = manager.create(&cart(&[])).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderEmpty);
    assert_eq!(OrderRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn unknown_product_rejects_whole_cart() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let err = manager
        .create(&cart(&[(&pid, 1), ("product:missing", 1)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ProductNotFound);

    // 整单拒绝: 即便第一个商品有效也不写库
    assert_eq!(OrderRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn verify_completes_paid_order() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    let manager = CheckoutManager::new(db.clone(), gateway);

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    let (succeeded, verified) = manager.verify(&order.order_id).await.unwrap();
    assert!(succeeded);
    assert_eq!(verified.status, OrderStatus::Completed);
    assert_eq!(verified.payment_id.as_deref(), Some("cf_12345"));
}

#[tokio::test]
async fn verify_fails_unpaid_order() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    gateway.paid.store(false, Ordering::SeqCst);
    let manager = CheckoutManager::new(db.clone(), gateway);

    let pid = seed_product(&db, "Heritage Wallet", 89.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    let (succeeded, verified) = manager.verify(&order.order_id).await.unwrap();
    assert!(!succeeded);
    assert_eq!(verified.status, OrderStatus::Failed);
    assert_eq!(verified.payment_id, None);
}

#[tokio::test]
async fn verify_is_idempotent_and_skips_gateway_after_terminal() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    let manager = CheckoutManager::new(db.clone(), gateway.clone());

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    let (first, completed) = manager.verify(&order.order_id).await.unwrap();
    assert!(first);
    assert_eq!(gateway.status_calls.load(Ordering::SeqCst), 1);

    // 网关结论翻转也不影响已记录的终态
    gateway.paid.store(false, Ordering::SeqCst);
    let (second, again) = manager.verify(&order.order_id).await.unwrap();
    assert!(second);
    assert_eq!(again.status, OrderStatus::Completed);
    assert_eq!(again.payment_id, completed.payment_id);
    // 终态订单不再访问网关
    assert_eq!(gateway.status_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn verify_unknown_order_is_not_found() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db, MockGateway::new());

    let err = manager.verify("ORD_0_ffffff").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn webhook_success_completes_pending_order() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    manager
        .reconcile_webhook(&WebhookNotification {
            order_id: order.order_id.clone(),
            payment_status: "SUCCESS".to_string(),
        })
        .await
        .unwrap();

    let reread = manager.find(&order.order_id).await.unwrap();
    assert_eq!(reread.status, OrderStatus::Completed);
}

#[tokio::test]
async fn webhook_non_success_fails_pending_order() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    let pid = seed_product(&db, "Heritage Wallet", 89.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    manager
        .reconcile_webhook(&WebhookNotification {
            order_id: order.order_id.clone(),
            payment_status: "USER_DROPPED".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(
        manager.find(&order.order_id).await.unwrap().status,
        OrderStatus::Failed
    );
}

#[tokio::test]
async fn first_terminal_write_wins_over_late_webhook() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    let manager = CheckoutManager::new(db.clone(), gateway);

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    // verify 先到, 订单进入 completed
    let (succeeded, _) = manager.verify(&order.order_id).await.unwrap();
    assert!(succeeded);

    // 迟到的相反结论 webhook 必须是 no-op
    manager
        .reconcile_webhook(&WebhookNotification {
            order_id: order.order_id.clone(),
            payment_status: "FAILED".to_string(),
        })
        .await
        .unwrap();

    let reread = manager.find(&order.order_id).await.unwrap();
    assert_eq!(reread.status, OrderStatus::Completed);
    assert_eq!(reread.payment_id.as_deref(), Some("cf_12345"));
}

#[tokio::test]
async fn first_terminal_write_wins_over_late_verify() {
    let (_dir, db) = test_db().await;
    let gateway = MockGateway::new();
    let manager = CheckoutManager::new(db.clone(), gateway.clone());

    let pid = seed_product(&db, "Classic Chronograph", 100.0).await;
    let (order, _) = manager.create(&cart(&[(&pid, 1)])).await.unwrap();

    // webhook 先写入 failed
    manager
        .reconcile_webhook(&WebhookNotification {
            order_id: order.order_id.clone(),
            payment_status: "FAILED".to_string(),
        })
        .await
        .unwrap();

    // 之后的 verify 返回记录结果, 不改写终态
    let (succeeded, verified) = manager.verify(&order.order_id).await.unwrap();
    assert!(!succeeded);
    assert_eq!(verified.status, OrderStatus::Failed);
    assert_eq!(gateway.status_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn webhook_for_unknown_order_is_ignored() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    // 未知订单号: 不报错, 不写库
    manager
        .reconcile_webhook(&WebhookNotification {
            order_id: "ORD_0_ffffff".to_string(),
            payment_status: "SUCCESS".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(OrderRepository::new(db).count().await.unwrap(), 0);
}

#[tokio::test]
async fn direct_order_is_created_without_session() {
    let (_dir, db) = test_db().await;
    let manager = CheckoutManager::new(db.clone(), MockGateway::new());

    let pid = seed_product(&db, "Heritage Wallet", 89.0).await;
    let mut request = cart(&[(&pid, 1)]);
    request.payment_method = Some("cod".to_string());

    let order = manager.place_direct(&request).await.unwrap();
    assert_eq!(order.status, OrderStatus::Created);
    assert_eq!(order.payment_method.as_deref(), Some("cod"));
    // 89.00 + 10% = 97.90
    assert!((order.total - 97.90).abs() < 1e-9, "{}", order.total);
}
