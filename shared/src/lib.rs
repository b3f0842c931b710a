//! Shared types for the Luxe storefront
//!
//! Common types used by the store server and client tooling: domain
//! models, request/response DTOs and the unified error system.

pub mod error;
pub mod models;
pub mod request;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
