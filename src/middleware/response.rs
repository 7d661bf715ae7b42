use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Wrapper for API responses that renders the `{data?, message?, status_code}` envelope
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub message: String,
    pub status_code: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Data only, 200 OK
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: String::new(),
            status_code: StatusCode::OK,
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status_code: StatusCode::OK,
        }
    }
}

impl ApiResponse<()> {
    /// Message only, 200 OK
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status_code: StatusCode::OK,
        }
    }
}

/// Presence rules: no data → message and status; empty message → data and status
pub fn envelope(data: Option<Value>, message: &str, status_code: StatusCode) -> Value {
    let mut body = Map::new();
    if let Some(data) = data {
        body.insert("data".to_string(), data);
    }
    if body.is_empty() || !message.is_empty() {
        body.insert("message".to_string(), Value::String(message.to_string()));
    }
    body.insert("status_code".to_string(), json!(status_code.as_u16()));
    Value::Object(body)
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data = match self.data.map(|data| serde_json::to_value(&data)).transpose() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                return (status, Json(envelope(None, "failed to format response", status))).into_response();
            }
        };

        (self.status_code, Json(envelope(data, &self.message, self.status_code))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
