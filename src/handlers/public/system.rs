// handlers/public/system.rs - GET / and GET /health

use axum::extract::State;
use serde_json::{json, Value};

use crate::database::prelude::*;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Phone Review API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    match state.store.ping().await {
        Ok(()) => Ok(ApiResponse::success(json!({
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok",
        }))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
