// handlers/protected/auth.rs - session management for the signed-in caller

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, ValidJson};
use crate::services::accounts::ChangePasswordInput;
use crate::state::AppState;

/// PUT /auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidJson(input): ValidJson<ChangePasswordInput>,
) -> ApiResult<()> {
    state.accounts().change_password(user.account_id, input).await?;
    Ok(ApiResponse::message("password updated successfully"))
}

/// POST /auth/logout - expires the refresh cookie
///
/// Access tokens are stateless, so an already-issued token stays valid until it expires.
pub async fn logout(Extension(user): Extension<AuthUser>, State(state): State<AppState>) -> Result<Response, ApiError> {
    let cookie = state
        .refresh_cookie()
        .delete_header()
        .ok_or_else(|| ApiError::internal_server_error("failed to build refresh cookie"))?;

    tracing::info!(account_id = user.account_id, "Logged out");
    let mut response = ApiResponse::message("logout successful").into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}
