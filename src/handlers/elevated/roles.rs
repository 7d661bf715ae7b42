// handlers/elevated/roles.rs - role CRUD
//
// Roles 1 (user) and 2 (admin) are reserved: update and delete answer 400.

use axum::extract::{Query, State};

use crate::database::models::{AccountSummary, Role};
use crate::middleware::{ApiResponse, ApiResult, IdPath, ValidJson};
use crate::services::messages;
use crate::services::roles::RoleInput;
use crate::state::AppState;
use crate::types::ListParams;

/// GET /roles?search=&sort=
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Vec<Role>> {
    Ok(ApiResponse::success(state.roles().list(&params.into()).await?))
}

/// POST /roles
pub async fn create(State(state): State<AppState>, ValidJson(input): ValidJson<RoleInput>) -> ApiResult<Role> {
    let role = state.roles().create(input).await?;
    Ok(ApiResponse::with_message(role, messages::added("role")))
}

/// GET /roles/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Role> {
    Ok(ApiResponse::success(state.roles().get(id).await?))
}

/// PUT /roles/:id
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<RoleInput>,
) -> ApiResult<Role> {
    let role = state.roles().update(id, input).await?;
    Ok(ApiResponse::with_message(role, messages::updated("role")))
}

/// DELETE /roles/:id
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.roles().delete(id).await?;
    Ok(ApiResponse::message(messages::deleted("role")))
}

/// GET /roles/:id/users
pub async fn accounts(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Vec<AccountSummary>> {
    Ok(ApiResponse::success(state.roles().accounts(id).await?))
}
