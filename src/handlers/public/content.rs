// handlers/public/content.rs - GET /reviews/:id/comments

use axum::extract::State;

use crate::database::models::CommentWithAuthor;
use crate::middleware::{ApiResponse, ApiResult, IdPath};
use crate::state::AppState;

pub async fn review_comments(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Vec<CommentWithAuthor>> {
    Ok(ApiResponse::success(state.reviews().comments(id).await?))
}
