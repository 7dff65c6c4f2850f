//! View computations over the inventory snapshot.

pub mod analytics;
pub mod forecasting;
pub mod procurement;
pub mod redistribution;

pub use analytics::AnalyticsService;
pub use forecasting::ForecastingService;
pub use procurement::ProcurementService;
pub use redistribution::RedistributionService;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{InventoryRecord, InventoryRow, OperationalFields, StockStatus, HOSPITALS};

    /// A scored row at the catalog position of `hospital`.
    pub fn row(hospital: &str, item: &str, quantity: u32, minimum: u32) -> InventoryRow {
        let site = HOSPITALS.iter().find(|h| h.name == hospital);
        InventoryRow {
            record: InventoryRecord {
                hospital_id: "HOSP-1000".into(),
                hospital_name: hospital.into(),
                city: site.map(|s| s.city).unwrap_or_default().into(),
                latitude: site.map(|s| s.latitude).unwrap_or_default(),
                longitude: site.map(|s| s.longitude).unwrap_or_default(),
                item_name: item.into(),
                category: "Medicine".into(),
                quantity_available: quantity,
                minimum_required: minimum,
                status: Some(StockStatus::from_quantities(quantity, minimum)),
                expiry_date: None,
            },
            operations: OperationalFields {
                daily_usage: 10,
                supplier_lead_time: 4,
                cost_per_unit: 100,
                supplier_name: "HealthCorp".into(),
            },
            days_to_stockout: f64::from(quantity) / 10.0,
            predicted_stockout_days: f64::from(quantity) / 10.0,
        }
    }
}
