//! Newsletter Subscriber Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Newsletter subscriber entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Stored lowercased; unique per subscriber
    pub email: String,
    pub subscribed_at: String,
    pub is_active: bool,
}
