use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
pub struct HospitalItemsQuery {
    /// Hospital name as listed by `/hospitals`
    #[validate(length(min = 1))]
    pub hospital: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/hospitals",
    responses(
        (status = 200, description = "Distinct hospital names in table order", body = ApiResponse<Vec<String>>)
    ),
    tag = "hospitals"
)]
pub async fn list_hospitals(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(Json(ApiResponse::success(
        state.services.forecasting.hospitals(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/hospitals/items",
    params(HospitalItemsQuery),
    responses(
        (status = 200, description = "Items stocked by the hospital", body = ApiResponse<Vec<String>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Unknown hospital", body = crate::errors::ErrorResponse)
    ),
    tag = "hospitals"
)]
pub async fn list_hospital_items(
    State(state): State<AppState>,
    Query(query): Query<HospitalItemsQuery>,
) -> ApiResult<Vec<String>> {
    query.validate()?;
    let items = state
        .services
        .forecasting
        .items_for_hospital(&query.hospital)?;
    Ok(Json(ApiResponse::success(items)))
}
