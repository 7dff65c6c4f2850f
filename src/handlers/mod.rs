pub mod dashboard;
pub mod health;
pub mod hospitals;
pub mod inventory;
pub mod predictions;
pub mod procurement;
pub mod transfers;

use std::sync::Arc;

use crate::dataset::InventorySnapshot;
use crate::services::{
    AnalyticsService, ForecastingService, ProcurementService, RedistributionService,
};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// View services shared by the HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub analytics: Arc<AnalyticsService>,
    pub forecasting: Arc<ForecastingService>,
    pub redistribution: Arc<RedistributionService>,
    pub procurement: Arc<ProcurementService>,
}

impl AppServices {
    pub fn new(snapshot: Arc<InventorySnapshot>) -> Self {
        Self {
            analytics: Arc::new(AnalyticsService::new(snapshot.clone())),
            forecasting: Arc::new(ForecastingService::new(snapshot.clone())),
            redistribution: Arc::new(RedistributionService::new(snapshot.clone())),
            procurement: Arc::new(ProcurementService::new(snapshot)),
        }
    }
}
