//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Product;
use crate::db::repository::{ProductFilter, ProductRepository};
use crate::utils::{AppError, AppResult, ErrorCode};

/// 商品列表查询参数
#[derive(Debug, Deserialize, Default)]
pub struct ProductQuery {
    /// 分类过滤, 额外支持伪分类 "new-arrivals"
    pub category: Option<String>,
    /// 搜索词, 大小写不敏感; 无匹配时返回相似商品
    pub search: Option<String>,
}

/// GET /api/products - 获取商品列表 (支持 category / search 过滤)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let filter = ProductFilter {
        category: query.category,
        search: query.search,
    };
    let products = repo.find(&filter).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })?;
    Ok(Json(product))
}

/// GET /api/products/category/:category - 按分类获取商品
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let filter = ProductFilter {
        category: Some(category),
        search: None,
    };
    let products = repo.find(&filter).await?;
    Ok(Json(products))
}
