// handlers/public/accounts.rs - member account reads
//
// Accounts holding the admin role are never visible here; see elevated::accounts.

use axum::extract::{Query, State};

use crate::database::models::{AccountSummary, Profile, Review};
use crate::middleware::{ApiResponse, ApiResult, IdPath};
use crate::state::AppState;
use crate::types::ListParams;

/// GET /users?search=&sort=
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Vec<AccountSummary>> {
    let users = state.accounts().list(false, &params.into()).await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<AccountSummary> {
    Ok(ApiResponse::success(state.accounts().get(id, false).await?))
}

/// GET /users/:id/profile
pub async fn profile(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Profile> {
    Ok(ApiResponse::success(state.accounts().profile_of(id, false).await?))
}

/// GET /users/:id/reviews
pub async fn reviews(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Vec<Review>> {
    Ok(ApiResponse::success(state.accounts().reviews_of(id, false).await?))
}
