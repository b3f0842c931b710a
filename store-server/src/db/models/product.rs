//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Watches,
    Wallets,
    Handbags,
}

impl ProductCategory {
    /// Parse a URL segment / query value into a category
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "watches" => Some(Self::Watches),
            "wallets" => Some(Self::Wallets),
            "handbags" => Some(Self::Handbags),
            _ => None,
        }
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub title: String,
    pub brand: String,
    /// Current price in currency units (2 decimal places)
    pub price: f64,
    /// Pre-discount price, if the product is on sale
    pub original_price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: ProductCategory,
    pub rating: f64,
    pub reviews: i32,
    pub is_new: bool,
    pub is_featured: bool,
    pub created_at: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub brand: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: ProductCategory,
    pub rating: Option<f64>,
    pub reviews: Option<i32>,
    pub is_new: Option<bool>,
    pub is_featured: Option<bool>,
}
