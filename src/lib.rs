//! VitalLink
//!
//! Hospital supply inventory: synthetic dataset generation and a JSON
//! dashboard with stock-out prediction, transfer matching and procurement.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod dataset;
pub mod errors;
pub mod handlers;
pub mod middleware_helpers;
pub mod ml;
pub mod models;
pub mod openapi;
pub mod services;
pub mod tracing;

use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::ToSchema;

use crate::dataset::InventorySnapshot;
use crate::handlers::AppServices;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::AppConfig>,
    pub snapshot: Arc<InventorySnapshot>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(config: config::AppConfig, snapshot: InventorySnapshot) -> Self {
        let snapshot = Arc::new(snapshot);
        Self {
            config: Arc::new(config),
            services: AppServices::new(snapshot.clone()),
            snapshot,
        }
    }
}

// Common response wrappers
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            meta: Some(ResponseMeta::capture()),
        }
    }
}

/// Standard API result type for JSON responses
pub type ApiResult<T> = Result<Json<ApiResponse<T>>, errors::ServiceError>;

/// Read-only dashboard routes, nested under `/api/v1`
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/dashboard/overview", get(handlers::dashboard::get_overview))
        .route("/dashboard/map", get(handlers::dashboard::get_map_markers))
        .route("/hospitals", get(handlers::hospitals::list_hospitals))
        .route(
            "/hospitals/items",
            get(handlers::hospitals::list_hospital_items),
        )
        .route("/inventory", get(handlers::inventory::list_inventory))
        .route("/predictions", get(handlers::predictions::get_prediction))
        .route("/transfers", get(handlers::transfers::list_transfers))
        .route(
            "/procurement",
            get(handlers::procurement::get_procurement_plan),
        )
}

/// Full application router: API, Swagger UI and the HTTP middleware stack.
pub fn app(state: AppState) -> Router {
    let cors_layer = if state.config.cors_allow_any_origin {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    Router::<AppState>::new()
        .route("/", get(|| async { "vitallink up" }))
        .nest("/api/v1", api_v1_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(cors_layer)
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
