//! Product Repository

use serde::Deserialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, strip_table_prefix};
use crate::db::models::{Product, ProductCategory, ProductCreate};

const PRODUCT_TABLE: &str = "product";

/// Fallback result size when a search matches nothing (original
/// storefront behavior: show similar products instead of an empty page)
const SEARCH_FALLBACK_LIMIT: usize = 10;

/// Catalog listing filter
///
/// `category` accepts the storefront's pseudo-category "new-arrivals",
/// which selects on the `is_new` flag instead of the category field.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Count catalog entries
    pub async fn count(&self) -> RepoResult<usize> {
        #[derive(Deserialize)]
        struct CountRow {
            count: i64,
        }

        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product GROUP ALL")
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }

    /// Find products by category
    pub async fn find_by_category(&self, category: ProductCategory) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE category = $cat ORDER BY created_at DESC")
            .bind(("cat", category))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find products matching a catalog filter
    ///
    /// Search is a case-insensitive substring match across title, brand
    /// and description. When a search term matches nothing, fall back to
    /// the category (or the whole catalog) so the storefront still has
    /// something to show.
    pub async fn find(&self, filter: &ProductFilter) -> RepoResult<Vec<Product>> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let Some(term) = search else {
            return self.find_filtered(filter.category.as_deref()).await;
        };

        let mut matches = self
            .search_in_category(term, filter.category.as_deref())
            .await?;

        if matches.is_empty() {
            // No exact matches: return similar products instead
            matches = self.find_filtered(filter.category.as_deref()).await?;
            matches.truncate(SEARCH_FALLBACK_LIMIT);
        }

        Ok(matches)
    }

    async fn find_filtered(&self, category: Option<&str>) -> RepoResult<Vec<Product>> {
        match category {
            Some("new-arrivals") => {
                let products: Vec<Product> = self
                    .base
                    .db()
                    .query("SELECT * FROM product WHERE is_new = true ORDER BY created_at DESC")
                    .await?
                    .take(0)?;
                Ok(products)
            }
            Some(raw) => match ProductCategory::parse(raw) {
                Some(category) => self.find_by_category(category).await,
                // Unknown category matches nothing, same as the document filter would
                None => Ok(Vec::new()),
            },
            None => self.find_all().await,
        }
    }

    async fn search_in_category(
        &self,
        term: &str,
        category: Option<&str>,
    ) -> RepoResult<Vec<Product>> {
        let needle = term.to_lowercase();
        let candidates = self.find_filtered(category).await?;

        Ok(candidates
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
                    || p.description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price < 0.0 || !data.price.is_finite() {
            return Err(RepoError::Validation("price must be non-negative".into()));
        }

        let product = Product {
            id: None,
            title: data.title,
            brand: data.brand,
            price: data.price,
            original_price: data.original_price,
            description: data.description,
            image: data.image,
            category: data.category,
            rating: data.rating.unwrap_or(4.5),
            reviews: data.reviews.unwrap_or(0),
            is_new: data.is_new.unwrap_or(false),
            is_featured: data.is_featured.unwrap_or(false),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }
}
