use axum::{extract::State, Json};
use serde::Serialize;
use std::time::Instant;
use utoipa::ToSchema;

use crate::dataset::BackfillReport;
use crate::{ApiResponse, ApiResult, AppState};

/// Tracks application start time for uptime calculation
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time (call this on application startup)
pub fn init_start_time() {
    let _ = START_TIME.get_or_init(Instant::now);
}

fn uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub rows_loaded: usize,
    pub critical_rows: usize,
    pub model_version: String,
    pub status_divergences: usize,
    pub loaded_at: String,
    pub backfill: BackfillReport,
}

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up and the snapshot is loaded", body = ApiResponse<HealthStatus>,
            headers(("X-Request-Id" = String, description = "Unique request id"))
        )
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResult<HealthStatus> {
    let snapshot = &state.snapshot;
    Ok(Json(ApiResponse::success(HealthStatus {
        status: "up".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime_secs(),
        rows_loaded: snapshot.len(),
        critical_rows: snapshot.critical_rows().count(),
        model_version: snapshot.model_version().to_string(),
        status_divergences: snapshot.status_divergences(),
        loaded_at: snapshot.loaded_at().to_rfc3339(),
        backfill: snapshot.backfill().clone(),
    })))
}
