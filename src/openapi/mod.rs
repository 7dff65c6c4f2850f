use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::dataset::{BackfillReport, OperationalColumn};
use crate::handlers;
use crate::models::{InventoryRecord, InventoryRow, OperationalFields, StockStatus};
use crate::services::{
    analytics::{DashboardOverview, MapMarker},
    forecasting::{StockoutPrediction, StockoutVerdict},
    procurement::{ProcurementLine, ProcurementPlan},
    redistribution::{TransferPlan, TransferSuggestion},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "VitalLink API",
        version = "0.2.0",
        description = r#"
# VitalLink hospital supply dashboard

Read-only views over a hospital inventory snapshot loaded at startup.

- **Overview**: stock KPIs, inventory value and map markers
- **Predictions**: random-forest days-to-stock-out against supplier lead time
- **Transfers**: first-match redistribution from surplus to short hospitals
- **Procurement**: reorder quantities to three times the minimum, with purchase-order text

Every response carries an `x-request-id` header, echoed in `meta.request_id`
and in error bodies.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        handlers::health::health_check,
        handlers::dashboard::get_overview,
        handlers::dashboard::get_map_markers,
        handlers::hospitals::list_hospitals,
        handlers::hospitals::list_hospital_items,
        handlers::inventory::list_inventory,
        handlers::predictions::get_prediction,
        handlers::transfers::list_transfers,
        handlers::procurement::get_procurement_plan,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        handlers::health::HealthStatus,
        BackfillReport,
        OperationalColumn,
        InventoryRecord,
        OperationalFields,
        InventoryRow,
        StockStatus,
        DashboardOverview,
        MapMarker,
        StockoutPrediction,
        StockoutVerdict,
        TransferPlan,
        TransferSuggestion,
        ProcurementLine,
        ProcurementPlan,
    )),
    tags(
        (name = "health", description = "Liveness and snapshot status"),
        (name = "dashboard", description = "Overview KPIs and map"),
        (name = "hospitals", description = "Selection lists"),
        (name = "inventory", description = "Scored inventory rows"),
        (name = "predictions", description = "Stock-out prediction"),
        (name = "transfers", description = "Inter-hospital redistribution"),
        (name = "procurement", description = "Reorder suggestions")
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDocV1::openapi())
}
