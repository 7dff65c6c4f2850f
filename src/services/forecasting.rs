use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::dataset::InventorySnapshot;
use crate::errors::ServiceError;
use crate::models::InventoryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockoutVerdict {
    /// Predicted to run out before a reorder placed today would arrive
    StockoutBeforeDelivery,
    Safe,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StockoutPrediction {
    pub hospital_name: String,
    pub item_name: String,
    pub quantity_available: u32,
    pub minimum_required: u32,
    pub daily_usage: u32,
    pub supplier_lead_time: u32,
    pub days_to_stockout: f64,
    pub predicted_stockout_days: f64,
    pub verdict: StockoutVerdict,
    pub alert: bool,
    /// Factors behind an alert; empty when safe
    pub explanation: Vec<String>,
    pub model_version: String,
}

/// Per-item stock-out lookups against the scored snapshot
#[derive(Clone)]
pub struct ForecastingService {
    snapshot: Arc<InventorySnapshot>,
}

impl ForecastingService {
    pub fn new(snapshot: Arc<InventorySnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn hospitals(&self) -> Vec<String> {
        self.snapshot
            .hospitals()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Items stocked by `hospital`; unknown hospitals are an error.
    pub fn items_for_hospital(&self, hospital: &str) -> Result<Vec<String>, ServiceError> {
        let items = self.snapshot.items_for_hospital(hospital);
        if items.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Hospital '{}' not found",
                hospital
            )));
        }
        Ok(items.into_iter().map(str::to_string).collect())
    }

    /// Prediction for the first row matching `(hospital, item)`.
    #[instrument(skip(self))]
    pub fn predict(&self, hospital: &str, item: &str) -> Result<StockoutPrediction, ServiceError> {
        let row = self.snapshot.find(hospital, item).ok_or_else(|| {
            ServiceError::NotFound(format!(
                "No inventory for '{}' at '{}'",
                item, hospital
            ))
        })?;

        let prediction = assess(row, self.snapshot.model_version());
        debug!(
            predicted = prediction.predicted_stockout_days,
            alert = prediction.alert,
            "Stock-out prediction served"
        );
        Ok(prediction)
    }
}

/// Alerts when the predicted horizon is shorter than the supplier lead time.
pub fn assess(row: &InventoryRow, model_version: &str) -> StockoutPrediction {
    let daily_usage = row.operations.daily_usage;
    let lead_time = row.operations.supplier_lead_time;
    let alert = row.predicted_stockout_days < f64::from(lead_time);

    let (verdict, explanation) = if alert {
        (
            StockoutVerdict::StockoutBeforeDelivery,
            vec![
                format!("Daily usage: {} units/day", daily_usage),
                format!("Supplier lead time: {} days", lead_time),
                "Current stock leaves insufficient buffer".to_string(),
            ],
        )
    } else {
        (StockoutVerdict::Safe, Vec::new())
    };

    StockoutPrediction {
        hospital_name: row.record.hospital_name.clone(),
        item_name: row.record.item_name.clone(),
        quantity_available: row.record.quantity_available,
        minimum_required: row.record.minimum_required,
        daily_usage,
        supplier_lead_time: lead_time,
        days_to_stockout: row.days_to_stockout,
        predicted_stockout_days: row.predicted_stockout_days,
        verdict,
        alert,
        explanation,
        model_version: model_version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::row;

    #[test]
    fn alerts_when_prediction_is_below_lead_time() {
        // fixture lead time is 4 days, prediction is quantity / 10
        let prediction = assess(&row("Salem Govt Hospital", "Insulin Vials", 35, 150), "m");
        assert!(prediction.alert);
        assert_eq!(prediction.verdict, StockoutVerdict::StockoutBeforeDelivery);
        assert_eq!(prediction.explanation[0], "Daily usage: 10 units/day");
        assert_eq!(prediction.explanation[1], "Supplier lead time: 4 days");
    }

    #[test]
    fn equal_to_lead_time_is_safe() {
        let prediction = assess(&row("Salem Govt Hospital", "Insulin Vials", 40, 150), "m");
        assert!(!prediction.alert);
        assert_eq!(prediction.verdict, StockoutVerdict::Safe);
        assert!(prediction.explanation.is_empty());
    }
}
