// handlers/public/catalog.rs - brand and phone reads

use axum::extract::{Query, State};

use crate::database::models::{Brand, PhoneReview, PhoneSummary, Specification};
use crate::middleware::{ApiResponse, ApiResult, IdPath};
use crate::state::AppState;
use crate::types::ListParams;

/// GET /brands?search=&sort=
pub async fn list_brands(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<Vec<Brand>> {
    Ok(ApiResponse::success(state.brands().list(&params.into()).await?))
}

/// GET /brands/:id
pub async fn get_brand(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Brand> {
    Ok(ApiResponse::success(state.brands().get(id).await?))
}

/// GET /brands/:id/phones
pub async fn brand_phones(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Vec<PhoneSummary>> {
    Ok(ApiResponse::success(state.brands().phones(id).await?))
}

/// GET /phones?search=&sort= - search matches "<brand> <model>"
pub async fn list_phones(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<PhoneSummary>> {
    Ok(ApiResponse::success(state.phones().list(&params.into()).await?))
}

/// GET /phones/:id - with brand name, full name and average rating
pub async fn get_phone(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<PhoneSummary> {
    Ok(ApiResponse::success(state.phones().get(id).await?))
}

/// GET /phones/:id/specification
pub async fn phone_specification(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Specification> {
    Ok(ApiResponse::success(state.specifications().get(id).await?))
}

/// GET /phones/:id/reviews
pub async fn phone_reviews(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<Vec<PhoneReview>> {
    Ok(ApiResponse::success(state.phones().reviews(id).await?))
}
