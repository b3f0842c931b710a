//! Subscriber Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Subscriber;

const SUBSCRIBER_TABLE: &str = "subscriber";

#[derive(Clone)]
pub struct SubscriberRepository {
    base: BaseRepository,
}

impl SubscriberRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a subscriber by (normalized) email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Subscriber>> {
        let subscribers: Vec<Subscriber> = self
            .base
            .db()
            .query("SELECT * FROM subscriber WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(subscribers.into_iter().next())
    }

    /// Create a new subscriber
    ///
    /// The unique index on `email` backs this up: a concurrent duplicate
    /// insert surfaces as [`RepoError::Duplicate`].
    pub async fn create(&self, email: &str) -> RepoResult<Subscriber> {
        let subscriber = Subscriber {
            id: None,
            email: email.to_string(),
            subscribed_at: chrono::Utc::now().to_rfc3339(),
            is_active: true,
        };

        let created: Option<Subscriber> = self
            .base
            .db()
            .create(SUBSCRIBER_TABLE)
            .content(subscriber)
            .await
            .map_err(|e| {
                let msg = e.to_string();
                if msg.contains("unique_subscriber_email") {
                    RepoError::Duplicate(format!("Subscriber {email} already exists"))
                } else {
                    RepoError::Database(msg)
                }
            })?;

        created.ok_or_else(|| RepoError::Database("Failed to create subscriber".to_string()))
    }
}
