// handlers/elevated/accounts.rs - admin account management

use axum::extract::{Query, State};
use axum::Extension;

use crate::database::models::{AccountSummary, Profile, Review};
use crate::handlers::public::auth::RegisteredUser;
use crate::middleware::{ApiResponse, ApiResult, IdPath, ValidJson, ValidatedAccount};
use crate::services::accounts::{PublicUser, RegisterInput};
use crate::services::messages;
use crate::state::AppState;
use crate::types::ListParams;

/// DELETE /users/:id - the reserved admin account answers 403
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(admin): Extension<ValidatedAccount>,
    IdPath(id): IdPath,
) -> ApiResult<()> {
    state.accounts().delete_by_id(id).await?;
    tracing::info!(account_id = id, by = admin.id, "Account removed by admin");
    Ok(ApiResponse::message(messages::deleted("user")))
}

/// GET /admins?search=&sort=
pub async fn list(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Vec<AccountSummary>> {
    Ok(ApiResponse::success(state.accounts().list(true, &params.into()).await?))
}

/// GET /admins/:id
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<AccountSummary> {
    Ok(ApiResponse::success(state.accounts().get(id, true).await?))
}

/// GET /admins/:id/profile
pub async fn profile(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Profile> {
    Ok(ApiResponse::success(state.accounts().profile_of(id, true).await?))
}

/// GET /admins/:id/reviews
pub async fn reviews(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Vec<Review>> {
    Ok(ApiResponse::success(state.accounts().reviews_of(id, true).await?))
}

/// POST /admins/register - only an existing admin can create another one
pub async fn register(
    State(state): State<AppState>,
    Extension(admin): Extension<ValidatedAccount>,
    ValidJson(input): ValidJson<RegisterInput>,
) -> ApiResult<RegisteredUser> {
    let account = state.accounts().register_admin(input).await?;
    tracing::info!(account_id = account.id, by = %admin.username, "Admin account registered");
    Ok(ApiResponse::with_message(
        RegisteredUser { user: PublicUser::from(&account) },
        "admin registration successful",
    ))
}
