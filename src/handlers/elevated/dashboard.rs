// handlers/elevated/dashboard.rs - GET /dashboard/all-count-data

use axum::extract::State;

use crate::database::models::CountEntry;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn all_count_data(State(state): State<AppState>) -> ApiResult<Vec<CountEntry>> {
    Ok(ApiResponse::success(state.dashboard().counts().await?))
}
