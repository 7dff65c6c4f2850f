use axum::{extract::State, Json};

use crate::services::redistribution::TransferPlan;
use crate::{ApiResponse, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/transfers",
    responses(
        (status = 200, description = "First-match transfer suggestions for short rows", body = ApiResponse<TransferPlan>)
    ),
    tag = "transfers"
)]
pub async fn list_transfers(State(state): State<AppState>) -> ApiResult<TransferPlan> {
    let plan = state.services.redistribution.plan();
    let message = plan.message.clone();
    let mut response = ApiResponse::success(plan);
    response.message = message;
    Ok(Json(response))
}
