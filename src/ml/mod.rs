/*!
 * # Stock-out prediction
 *
 * Regression over four inventory features predicting how many days of stock
 * remain. Views only see the [`StockoutModel`] trait; the default
 * implementation is [`RandomForestRegressor`].
 */

pub mod random_forest;

pub use random_forest::{ForestConfig, RandomForestRegressor};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::errors::ServiceError;
use crate::models::{InventoryRow, StockedRecord};

/// Number of model inputs
pub const FEATURE_COUNT: usize = 4;

/// Model inputs for one inventory row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StockoutFeatures {
    pub quantity_available: f64,
    pub minimum_required: f64,
    pub daily_usage: f64,
    pub supplier_lead_time: f64,
}

impl StockoutFeatures {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.quantity_available,
            self.minimum_required,
            self.daily_usage,
            self.supplier_lead_time,
        ]
    }
}

/// A fitted scoring function for days-to-stock-out.
pub trait StockoutModel: Send + Sync {
    /// Identifier reported by the health endpoint
    fn model_version(&self) -> &str;

    /// Point prediction, in days
    fn predict(&self, features: &StockoutFeatures) -> f64;
}

/// Rounds a prediction to one decimal place for display, halves to even.
pub fn round_prediction(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Fits the default forest on every record, targeting the derived
/// days-to-stock-out. There is no hold-out set: the model is descriptive.
#[instrument(skip(records), fields(rows = records.len()))]
pub fn fit_stockout_model(
    records: &[StockedRecord],
    config: ForestConfig,
) -> Result<RandomForestRegressor, ServiceError> {
    let features: Vec<[f64; FEATURE_COUNT]> =
        records.iter().map(|r| r.features().to_array()).collect();
    let targets: Vec<f64> = records.iter().map(StockedRecord::days_to_stockout).collect();

    let model = RandomForestRegressor::fit(config, &features, &targets)?;
    info!(
        trees = model.tree_count(),
        version = model.model_version(),
        "Stock-out model fitted"
    );
    Ok(model)
}

/// Scores every record with `model`, producing the rows the dashboard serves.
pub fn score_records(model: &dyn StockoutModel, records: Vec<StockedRecord>) -> Vec<InventoryRow> {
    records
        .into_iter()
        .map(|stocked| {
            let days_to_stockout = stocked.days_to_stockout();
            let predicted = round_prediction(model.predict(&stocked.features()));
            InventoryRow {
                record: stocked.record,
                operations: stocked.operations,
                days_to_stockout,
                predicted_stockout_days: predicted,
            }
        })
        .collect()
}
