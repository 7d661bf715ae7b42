use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::database::prelude::*;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{RoleKind, Tier};

use super::auth::AuthUser;

/// Account resolved from the token, with its role, for tier-gated routes
#[derive(Clone, Debug)]
pub struct ValidatedAccount {
    pub id: i64,
    pub username: String,
    pub role: RoleKind,
}

/// Authorization gate for admin-only routes; must run after `authenticate`
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_tier(&state, Tier::Admin, request, next).await
}

async fn require_tier(
    state: &AppState,
    required: Tier,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = *request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    // Deleted after the token was issued
    let identity = state
        .store
        .find_identity(auth_user.account_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(account_id = auth_user.account_id, "Authorization failed: account no longer exists");
            ApiError::not_found("user not found")
        })?;

    let role = RoleKind::from_name(&identity.role_name);
    if !role.satisfies(required) {
        tracing::warn!(
            account_id = identity.id,
            role = %identity.role_name,
            "Authorization failed: {:?} tier required",
            required
        );
        return Err(ApiError::forbidden("you are not allowed to access this resource"));
    }

    tracing::debug!(account_id = identity.id, username = %identity.username, "Authorization granted");
    request.extensions_mut().insert(ValidatedAccount {
        id: identity.id,
        username: identity.username,
        role,
    });

    Ok(next.run(request).await)
}
