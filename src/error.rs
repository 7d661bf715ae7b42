// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::TokenError;
use crate::database::StoreError;
use crate::services::ServiceError;

/// HTTP API error rendered as the `{data?, message, status_code}` envelope
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),
    /// 404 that still carries `data: []` (filtered listing with no match)
    EmptyResult(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) | ApiError::EmptyResult(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::InvalidJson(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::EmptyResult(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        let status = self.status_code().as_u16();
        match self {
            ApiError::EmptyResult(message) => json!({
                "data": [],
                "message": message,
                "status_code": status,
            }),
            _ => json!({
                "message": self.message(),
                "status_code": status,
            }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) | ServiceError::Conflict(msg) | ServiceError::InUse(msg) => {
                ApiError::bad_request(msg)
            }
            ServiceError::InvalidCredentials => ApiError::bad_request(err.to_string()),
            ServiceError::Unauthorized(msg) => ApiError::unauthorized(msg),
            ServiceError::Forbidden(msg) => ApiError::forbidden(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::EmptyResult(msg) => ApiError::EmptyResult(msg),
            ServiceError::Internal(msg) => {
                // Log the real error but return generic message
                tracing::error!("Internal error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ServiceError::from(err).into()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ServiceError::from(err).into()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::validation("x"), 400),
            (ServiceError::conflict("brand"), 400),
            (ServiceError::InUse("x".into()), 400),
            (ServiceError::InvalidCredentials, 400),
            (ServiceError::Unauthorized("x".into()), 401),
            (ServiceError::forbidden("x"), 403),
            (ServiceError::not_found("brand"), 404),
            (ServiceError::EmptyResult("x".into()), 404),
            (ServiceError::Internal("boom".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code().as_u16(), status);
        }
    }

    #[test]
    fn error_envelope_omits_data() {
        let body = ApiError::not_found("brand not found").to_json();
        assert_eq!(body, json!({"message": "brand not found", "status_code": 404}));
    }

    #[test]
    fn empty_result_envelope_carries_empty_data() {
        let body = ApiError::EmptyResult("brands not found".into()).to_json();
        assert_eq!(body["data"], json!([]));
        assert_eq!(body["status_code"], 404);
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(ServiceError::Internal("connection refused on 10.0.0.3".into()));
        assert!(!err.message().contains("10.0.0.3"));
    }

    #[test]
    fn wrong_credentials_message_is_generic() {
        assert_eq!(ApiError::from(ServiceError::InvalidCredentials).message(), "wrong credentials");
    }
}
