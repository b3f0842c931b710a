//! Database entity models (SurrealDB)

pub mod product;
pub mod serde_helpers;
pub mod subscriber;

pub use product::{Product, ProductCategory, ProductCreate};
pub use subscriber::Subscriber;
