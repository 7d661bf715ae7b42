use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::TokenError;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved once from the bearer token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub account_id: i64,
}

/// Authentication gate: rejects the request with 401 unless it carries a valid access token
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.uri().query(), request.headers())?;

    let account_id = state.tokens.verify(&token).map_err(|e| {
        tracing::warn!("Token rejected: {}", e);
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(AuthUser { account_id });
    Ok(next.run(request).await)
}

/// The `token` query parameter wins over the `Authorization: Bearer` header
pub fn extract_token(query: Option<&str>, headers: &HeaderMap) -> Result<String, TokenError> {
    let from_query = query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
    });
    if let Some(token) = from_query.filter(|t| !t.is_empty()) {
        return Ok(token);
    }

    let auth_header = headers.get(header::AUTHORIZATION).ok_or(TokenError::Missing)?;
    let auth_str = auth_header.to_str().map_err(|_| TokenError::Malformed)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        Some(_) => Err(TokenError::Missing),
        None => Err(TokenError::Malformed),
    }
}
