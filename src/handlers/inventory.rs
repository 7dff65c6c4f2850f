use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::models::InventoryRow;
use crate::{ApiResponse, ApiResult, AppState};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct InventoryFilters {
    pub hospital: Option<String>,
    pub item: Option<String>,
    /// Only rows below their minimum
    #[serde(default)]
    pub critical_only: bool,
}

impl InventoryFilters {
    fn matches(&self, row: &InventoryRow) -> bool {
        self.hospital
            .as_deref()
            .map_or(true, |h| row.record.hospital_name == h)
            && self
                .item
                .as_deref()
                .map_or(true, |i| row.record.item_name == i)
            && (!self.critical_only || row.is_critical())
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    params(InventoryFilters),
    responses(
        (status = 200, description = "Scored inventory rows", body = ApiResponse<Vec<InventoryRow>>,
            headers(("X-Request-Id" = String, description = "Unique request id for tracing"))
        ),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    Query(filters): Query<InventoryFilters>,
) -> ApiResult<Vec<InventoryRow>> {
    let rows: Vec<InventoryRow> = state
        .snapshot
        .rows()
        .iter()
        .filter(|row| filters.matches(row))
        .cloned()
        .collect();
    Ok(Json(ApiResponse::success(rows)))
}
