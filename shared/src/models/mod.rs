//! Domain models shared between server and client tooling
//!
//! Database entities (products, subscribers) live in the server's `db`
//! layer; only the order types cross the API boundary in both directions.

pub mod order;

pub use order::{Order, OrderItem, OrderStatus};
