// handlers/elevated/catalog.rs - brand, phone and specification writes

use axum::extract::State;

use crate::database::models::{Brand, Phone, Specification};
use crate::middleware::{ApiResponse, ApiResult, IdPath, ValidJson};
use crate::services::brands::BrandInput;
use crate::services::messages;
use crate::services::phones::PhoneInput;
use crate::services::specifications::SpecificationInput;
use crate::state::AppState;

/// POST /brands
pub async fn create_brand(State(state): State<AppState>, ValidJson(input): ValidJson<BrandInput>) -> ApiResult<Brand> {
    let brand = state.brands().create(input).await?;
    Ok(ApiResponse::with_message(brand, messages::added("brand")))
}

/// PUT /brands/:id
pub async fn update_brand(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<BrandInput>,
) -> ApiResult<Brand> {
    let brand = state.brands().update(id, input).await?;
    Ok(ApiResponse::with_message(brand, messages::updated("brand")))
}

/// DELETE /brands/:id - refused while phones reference the brand
pub async fn delete_brand(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.brands().delete(id).await?;
    Ok(ApiResponse::message(messages::deleted("brand")))
}

/// POST /phones
pub async fn create_phone(State(state): State<AppState>, ValidJson(input): ValidJson<PhoneInput>) -> ApiResult<Phone> {
    let phone = state.phones().create(input).await?;
    Ok(ApiResponse::with_message(phone, messages::added("phone")))
}

/// PUT /phones/:id
pub async fn update_phone(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidJson(input): ValidJson<PhoneInput>,
) -> ApiResult<Phone> {
    let phone = state.phones().update(id, input).await?;
    Ok(ApiResponse::with_message(phone, messages::updated("phone")))
}

/// DELETE /phones/:id - cascades to specification, reviews and comments
pub async fn delete_phone(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<()> {
    state.phones().delete(id).await?;
    Ok(ApiResponse::message(messages::deleted("phone")))
}

/// POST /phones/:id/specification
pub async fn create_specification(
    State(state): State<AppState>,
    IdPath(phone_id): IdPath,
    ValidJson(input): ValidJson<SpecificationInput>,
) -> ApiResult<Specification> {
    let spec = state.specifications().create(phone_id, input).await?;
    Ok(ApiResponse::with_message(spec, messages::added("specification")))
}

/// PUT /phones/:id/specification
pub async fn update_specification(
    State(state): State<AppState>,
    IdPath(phone_id): IdPath,
    ValidJson(input): ValidJson<SpecificationInput>,
) -> ApiResult<Specification> {
    let spec = state.specifications().update(phone_id, input).await?;
    Ok(ApiResponse::with_message(spec, messages::updated("specification")))
}
