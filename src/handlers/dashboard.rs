use axum::{extract::State, Json};

use crate::services::analytics::{DashboardOverview, MapMarker};
use crate::{ApiResponse, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/overview",
    responses(
        (status = 200, description = "Headline inventory KPIs", body = ApiResponse<DashboardOverview>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_overview(State(state): State<AppState>) -> ApiResult<DashboardOverview> {
    Ok(Json(ApiResponse::success(state.services.analytics.overview())))
}

#[utoipa::path(
    get,
    path = "/api/v1/dashboard/map",
    responses(
        (status = 200, description = "One marker per inventory row", body = ApiResponse<Vec<MapMarker>>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        ),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_map_markers(State(state): State<AppState>) -> ApiResult<Vec<MapMarker>> {
    Ok(Json(ApiResponse::success(
        state.services.analytics.map_markers(),
    )))
}
