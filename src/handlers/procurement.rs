use axum::{extract::State, Json};

use crate::services::procurement::ProcurementPlan;
use crate::{ApiResponse, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/procurement",
    responses(
        (status = 200, description = "Reorder lines and purchase-order text", body = ApiResponse<ProcurementPlan>)
    ),
    tag = "procurement"
)]
pub async fn get_procurement_plan(State(state): State<AppState>) -> ApiResult<ProcurementPlan> {
    let plan = state.services.procurement.plan();
    let message = plan.message.clone();
    let mut response = ApiResponse::success(plan);
    response.message = message;
    Ok(Json(response))
}
