use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::services::forecasting::StockoutPrediction;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PredictionQuery {
    #[validate(length(min = 1))]
    pub hospital: String,
    #[validate(length(min = 1))]
    pub item: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/predictions",
    params(PredictionQuery),
    responses(
        (status = 200, description = "Predicted days to stock-out with lead-time alert", body = ApiResponse<StockoutPrediction>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "No row for the hospital and item", body = crate::errors::ErrorResponse)
    ),
    tag = "predictions"
)]
pub async fn get_prediction(
    State(state): State<AppState>,
    Query(query): Query<PredictionQuery>,
) -> ApiResult<StockoutPrediction> {
    query.validate()?;
    let prediction = state
        .services
        .forecasting
        .predict(&query.hospital, &query.item)?;
    Ok(Json(ApiResponse::success(prediction)))
}
