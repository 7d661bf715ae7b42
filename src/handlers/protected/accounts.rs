// handlers/protected/accounts.rs - the caller's own account and profile

use axum::{extract::State, Extension};
use serde::Serialize;

use crate::database::models::Profile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::services::accounts::{AccountUpdateInput, DeleteAccountInput, PublicUser};
use crate::services::messages;
use crate::services::profiles::ProfileInput;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleName {
    pub role_name: String,
}

/// GET /users/role
pub async fn role(State(state): State<AppState>, Extension(user): Extension<AuthUser>) -> ApiResult<RoleName> {
    let role_name = state.accounts().role_name(user.account_id).await?;
    Ok(ApiResponse::success(RoleName { role_name }))
}

/// PUT /users - partial update of username and email
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<AccountUpdateInput>,
) -> ApiResult<PublicUser> {
    let account = state.accounts().update(user.account_id, input).await?;
    Ok(ApiResponse::with_message(PublicUser::from(&account), messages::updated("user")))
}

/// DELETE /users - requires `{"password": ...}`; cascades to profile, reviews and comments
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<DeleteAccountInput>,
) -> ApiResult<()> {
    state.accounts().delete_own(user.account_id, input).await?;
    Ok(ApiResponse::message(messages::deleted("user")))
}

/// POST /profiles
pub async fn create_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<ProfileInput>,
) -> ApiResult<Profile> {
    let profile = state.profiles().create(user.account_id, input).await?;
    Ok(ApiResponse::with_message(profile, messages::added("profile")))
}

/// PUT /profiles
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<ProfileInput>,
) -> ApiResult<Profile> {
    let profile = state.profiles().update(user.account_id, input).await?;
    Ok(ApiResponse::with_message(profile, messages::updated("profile")))
}
