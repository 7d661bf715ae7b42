// handlers/public/auth.rs - token acquisition endpoints

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::cookie::{extract_cookie, REFRESH_COOKIE_NAME};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::services::accounts::{LoginInput, PublicUser, RegisterInput};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RegisteredUser {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshData {
    pub token: String,
}

/// POST /auth/register - create a `user` account
///
/// Only username and email are echoed back; the password never leaves the service.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RegisterInput>,
) -> ApiResult<RegisteredUser> {
    let account = state.accounts().register(input).await?;
    Ok(ApiResponse::with_message(
        RegisteredUser { user: PublicUser::from(&account) },
        "registration successful",
    ))
}

/// POST /auth/login - exchange credentials for an access token
///
/// The access token is returned in the body; the refresh token is set as an
/// http-only `refresh_token` cookie.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginInput>,
) -> Result<Response, ApiError> {
    let account = state.accounts().authenticate(input).await?;
    let token = state.tokens.issue_access_token(account.id)?;
    let refresh = state.tokens.issue_refresh_token(account.id)?;

    let cookie = state
        .refresh_cookie()
        .set_header(&refresh)
        .ok_or_else(|| ApiError::internal_server_error("failed to build refresh cookie"))?;

    tracing::info!(account_id = account.id, "Login succeeded");
    let mut response = ApiResponse::with_message(
        LoginData { user: PublicUser::from(&account), token },
        "login successful",
    )
    .into_response();
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// POST /auth/refresh - new access token from the refresh cookie
pub async fn refresh(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<RefreshData> {
    let cookie = extract_cookie(&headers, REFRESH_COOKIE_NAME)
        .ok_or_else(|| ApiError::unauthorized("refresh token is missing"))?;
    let account_id = state.tokens.verify_refresh(&cookie)?;
    let account = state.accounts().active_account(account_id).await?;

    let token = state.tokens.issue_access_token(account.id)?;
    tracing::debug!(account_id = account.id, "Access token refreshed");
    Ok(ApiResponse::success(RefreshData { token }))
}
