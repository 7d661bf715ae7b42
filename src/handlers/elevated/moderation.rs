// handlers/elevated/moderation.rs - full content listings and comment removal

use axum::extract::State;

use crate::database::models::{Comment, ReviewListing};
use crate::middleware::{ApiResponse, ApiResult, IdPath};
use crate::services::messages;
use crate::state::AppState;

/// GET /reviews - every review with reviewer username and phone model
pub async fn list_reviews(State(state): State<AppState>) -> ApiResult<Vec<ReviewListing>> {
    Ok(ApiResponse::success(state.reviews().list_all().await?))
}

/// GET /comments
pub async fn list_comments(State(state): State<AppState>) -> ApiResult<Vec<Comment>> {
    Ok(ApiResponse::success(state.comments().list_all().await?))
}

/// DELETE /comments/:id/admin
pub async fn delete_comment(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.comments().delete_as_admin(id).await?;
    Ok(ApiResponse::message(messages::deleted("comment")))
}
