//! Default catalog seeding
//!
//! On first boot the product table is empty; seed it with the bundled
//! catalog so the storefront renders something out of the box.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::models::{ProductCategory, ProductCreate};
use crate::db::repository::ProductRepository;
use crate::utils::AppError;

fn default_catalog() -> Vec<ProductCreate> {
    use ProductCategory::*;

    let entry = |title: &str,
                 brand: &str,
                 price: f64,
                 original_price: Option<f64>,
                 category: ProductCategory,
                 is_new: bool,
                 is_featured: bool| ProductCreate {
        title: title.to_string(),
        brand: brand.to_string(),
        price,
        original_price,
        description: None,
        image: None,
        category,
        rating: None,
        reviews: None,
        is_new: Some(is_new),
        is_featured: Some(is_featured),
    };

    vec![
        entry("Classic Chronograph", "Aurelia", 459.00, Some(529.00), Watches, false, true),
        entry("Minimalist Automatic", "Aurelia", 389.00, None, Watches, true, false),
        entry("Heritage Moonphase", "Castellan", 799.00, None, Watches, false, true),
        entry("Slim Bifold Wallet", "Marlowe", 89.00, Some(109.00), Wallets, false, false),
        entry("Cardholder Nappa", "Marlowe", 59.00, None, Wallets, true, false),
        entry("Travel Zip Wallet", "Castellan", 129.00, None, Wallets, false, false),
        entry("Quilted Tote", "Seraphine", 349.00, Some(399.00), Handbags, false, true),
        entry("Evening Clutch", "Seraphine", 199.00, None, Handbags, true, false),
        entry("Structured Satchel", "Castellan", 429.00, None, Handbags, false, false),
    ]
}

/// Insert the default catalog when the product table is empty.
///
/// Returns the number of products inserted (0 when the table already
/// has data).
pub async fn seed_default_catalog(db: &Surreal<Db>) -> Result<usize, AppError> {
    let repo = ProductRepository::new(db.clone());

    let existing = repo
        .count()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if existing > 0 {
        return Ok(0);
    }

    let catalog = default_catalog();
    let total = catalog.len();
    for product in catalog {
        repo.create(product)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
    }

    Ok(total)
}
