//! 商品目录与订阅集成测试

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use store_server::db::models::{ProductCategory, ProductCreate};
use store_server::db::repository::{
    ProductFilter, ProductRepository, RepoError, SubscriberRepository,
};
use store_server::db::{define_schema, seed};

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

fn product(title: &str, brand: &str, category: ProductCategory, is_new: bool) -> ProductCreate {
    ProductCreate {
        title: title.to_string(),
        brand: brand.to_string(),
        price: 100.0,
        original_price: None,
        description: Some(format!("{title} by {brand}")),
        image: None,
        category,
        rating: None,
        reviews: None,
        is_new: Some(is_new),
        is_featured: None,
    }
}

#[tokio::test]
async fn category_filter_returns_only_that_category() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);

    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, false))
        .await
        .unwrap();
    repo.create(product("Billfold", "Castellan", ProductCategory::Wallets, false))
        .await
        .unwrap();

    let watches = repo
        .find(&ProductFilter {
            category: Some("watches".to_string()),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(watches.len(), 1);
    assert_eq!(watches[0].title, "Chronograph");
}

#[tokio::test]
async fn new_arrivals_is_a_flag_not_a_category() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);

    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, true))
        .await
        .unwrap();
    repo.create(product("Billfold", "Castellan", ProductCategory::Wallets, false))
        .await
        .unwrap();

    let arrivals = repo
        .find(&ProductFilter {
            category: Some("new-arrivals".to_string()),
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(arrivals.len(), 1);
    assert!(arrivals[0].is_new);
}

#[tokio::test]
async fn unknown_category_matches_nothing() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);
    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, false))
        .await
        .unwrap();

    let none = repo
        .find(&ProductFilter {
            category: Some("sunglasses".to_string()),
            search: None,
        })
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn search_matches_title_brand_and_description_case_insensitively() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);

    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, false))
        .await
        .unwrap();
    repo.create(product("Billfold", "Castellan", ProductCategory::Wallets, false))
        .await
        .unwrap();

    for term in ["chrono", "AURELIA", "by Aurelia"] {
        let hits = repo
            .find(&ProductFilter {
                category: None,
                search: Some(term.to_string()),
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1, "term {term:?}");
        assert_eq!(hits[0].title, "Chronograph");
    }
}

#[tokio::test]
async fn empty_search_falls_back_to_similar_products() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);

    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, false))
        .await
        .unwrap();
    repo.create(product("Billfold", "Castellan", ProductCategory::Wallets, false))
        .await
        .unwrap();

    // 无匹配时不返回空页, 而是回退到整个候选集
    let fallback = repo
        .find(&ProductFilter {
            category: None,
            search: Some("zeppelin".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(fallback.len(), 2);

    // 分类内搜索回退也限制在该分类
    let scoped = repo
        .find(&ProductFilter {
            category: Some("wallets".to_string()),
            search: Some("zeppelin".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].title, "Billfold");
}

#[tokio::test]
async fn whitespace_search_is_treated_as_absent() {
    let (_dir, db) = test_db().await;
    let repo = ProductRepository::new(db);
    repo.create(product("Chronograph", "Aurelia", ProductCategory::Watches, false))
        .await
        .unwrap();

    let all = repo
        .find(&ProductFilter {
            category: None,
            search: Some("   ".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn default_catalog_seeds_once() {
    let (_dir, db) = test_db().await;

    let first = seed::seed_default_catalog(&db).await.unwrap();
    assert!(first > 0);

    // 二次启动不重复播种
    let second = seed::seed_default_catalog(&db).await.unwrap();
    assert_eq!(second, 0);

    let repo = ProductRepository::new(db);
    assert_eq!(repo.count().await.unwrap(), first);
}

#[tokio::test]
async fn duplicate_subscription_is_detected() {
    let (_dir, db) = test_db().await;
    let repo = SubscriberRepository::new(db);

    repo.create("shopper@example.com").await.unwrap();
    assert!(
        repo.find_by_email("shopper@example.com")
            .await
            .unwrap()
            .is_some()
    );

    let err = repo.create("shopper@example.com").await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
