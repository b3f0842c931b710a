//! Subscription API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use shared::request::{SubscribeRequest, SubscribeResponse};

use crate::core::ServerState;
use crate::db::repository::{RepoError, SubscriberRepository};
use crate::utils::{AppResult, normalize_email};

/// POST /api/subscriptions - 邮件订阅
///
/// 邮箱先归一化 (trim + 小写) 再查重; 重复订阅返回 200 并标记
/// `is_already_subscribed`, 不算错误。
pub async fn subscribe(
    State(state): State<ServerState>,
    Json(payload): Json<SubscribeRequest>,
) -> AppResult<Json<SubscribeResponse>> {
    payload.validate()?;
    let email = normalize_email(&payload.email);

    let repo = SubscriberRepository::new(state.db.clone());
    if repo.find_by_email(&email).await?.is_some() {
        return Ok(Json(SubscribeResponse {
            success: true,
            message: "You are already subscribed".to_string(),
            is_already_subscribed: true,
        }));
    }

    match repo.create(&email).await {
        Ok(_) => Ok(Json(SubscribeResponse {
            success: true,
            message: "Subscribed successfully".to_string(),
            is_already_subscribed: false,
        })),
        // 并发重复插入被唯一索引拦下, 等同已订阅
        Err(RepoError::Duplicate(_)) => Ok(Json(SubscribeResponse {
            success: true,
            message: "You are already subscribed".to_string(),
            is_already_subscribed: true,
        })),
        Err(e) => Err(e.into()),
    }
}
