//! Database Module
//!
//! Embedded SurrealDB storage: connection setup, schema definition and
//! catalog seeding.

pub mod models;
pub mod repository;
pub mod seed;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "luxe";
const DATABASE: &str = "store";

/// Database service — owns an embedded SurrealDB instance
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the embedded database at `db_path` and prepare the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;
        tracing::info!("Database ready at {}", db_path);

        // Seed the default catalog on first boot
        let seeded = seed::seed_default_catalog(&db).await?;
        if seeded > 0 {
            tracing::info!(count = seeded, "Seeded default product catalog");
        }

        Ok(Self { db })
    }
}

/// Define tables and unique indexes
///
/// `order.order_id` uniqueness backs the id-generation guarantee;
/// `subscriber.email` uniqueness backs duplicate-subscription detection.
pub async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        "DEFINE INDEX IF NOT EXISTS unique_order_id ON TABLE order FIELDS order_id UNIQUE;
         DEFINE INDEX IF NOT EXISTS unique_subscriber_email ON TABLE subscriber FIELDS email UNIQUE;",
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;
    Ok(())
}
