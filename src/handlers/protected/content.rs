// handlers/protected/content.rs - reviews and comments owned by the caller
//
// Deletes also accept admins (moderation); updates are owner-only.

use axum::{extract::State, Extension};

use crate::database::models::{Comment, Review};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, IdPath, ValidJson};
use crate::services::comments::CommentInput;
use crate::services::messages;
use crate::services::reviews::ReviewInput;
use crate::state::AppState;

/// POST /phones/:id/reviews
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(phone_id): IdPath,
    ValidJson(input): ValidJson<ReviewInput>,
) -> ApiResult<Review> {
    let review = state.reviews().create(user.account_id, phone_id, input).await?;
    Ok(ApiResponse::with_message(review, messages::added("review")))
}

/// PUT /reviews/:id
pub async fn update_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<ReviewInput>,
) -> ApiResult<Review> {
    let review = state.reviews().update(user.account_id, id, input).await?;
    Ok(ApiResponse::with_message(review, messages::updated("review")))
}

/// DELETE /reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> ApiResult<()> {
    state.reviews().delete(user.account_id, id).await?;
    Ok(ApiResponse::message(messages::deleted("review")))
}

/// POST /reviews/:id/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(review_id): IdPath,
    ValidJson(input): ValidJson<CommentInput>,
) -> ApiResult<Comment> {
    let comment = state.comments().create(user.account_id, review_id, input).await?;
    Ok(ApiResponse::with_message(comment, messages::added("comment")))
}

/// PUT /comments/:id
pub async fn update_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<CommentInput>,
) -> ApiResult<Comment> {
    let comment = state.comments().update(user.account_id, id, input).await?;
    Ok(ApiResponse::with_message(comment, messages::updated("comment")))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    IdPath(id): IdPath,
) -> ApiResult<()> {
    state.comments().delete(user.account_id, id).await?;
    Ok(ApiResponse::message(messages::deleted("comment")))
}
