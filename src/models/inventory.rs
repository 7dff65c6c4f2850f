use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::ml::StockoutFeatures;

/// Stock status as recorded when the row was generated.
///
/// The value is stored, never recomputed: a row's `status` can disagree with
/// [`InventoryRecord::is_critical`] if the file was edited after generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    Normal,
    #[serde(rename = "CRITICAL")]
    Critical,
}

impl StockStatus {
    pub fn from_quantities(quantity_available: u32, minimum_required: u32) -> Self {
        if quantity_available < minimum_required {
            StockStatus::Critical
        } else {
            StockStatus::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Normal => "Normal",
            StockStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (hospital, supply item) row of the inventory file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InventoryRecord {
    pub hospital_id: String,
    pub hospital_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub item_name: String,
    pub category: String,
    pub quantity_available: u32,
    pub minimum_required: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StockStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryRecord {
    /// Live critical-stock condition, independent of the stored status.
    pub fn is_critical(&self) -> bool {
        self.quantity_available < self.minimum_required
    }

    /// True when a stored status exists and disagrees with the live condition.
    pub fn status_diverges(&self) -> bool {
        self.status
            .map(|status| {
                status != StockStatus::from_quantities(self.quantity_available, self.minimum_required)
            })
            .unwrap_or(false)
    }
}

/// Usage and supplier columns; synthesized when the file lacks them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OperationalFields {
    pub daily_usage: u32,
    /// Days between placing an order and delivery
    pub supplier_lead_time: u32,
    pub cost_per_unit: u32,
    pub supplier_name: String,
}

/// Days until the available quantity runs out at the current usage rate.
///
/// Zero usage yields zero rather than an infinite horizon.
pub fn days_to_stockout(quantity_available: u32, daily_usage: u32) -> f64 {
    if daily_usage == 0 {
        return 0.0;
    }
    f64::from(quantity_available) / f64::from(daily_usage)
}

/// A record with its operational columns resolved, ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct StockedRecord {
    pub record: InventoryRecord,
    pub operations: OperationalFields,
}

impl StockedRecord {
    pub fn days_to_stockout(&self) -> f64 {
        days_to_stockout(self.record.quantity_available, self.operations.daily_usage)
    }

    pub fn features(&self) -> StockoutFeatures {
        StockoutFeatures {
            quantity_available: f64::from(self.record.quantity_available),
            minimum_required: f64::from(self.record.minimum_required),
            daily_usage: f64::from(self.operations.daily_usage),
            supplier_lead_time: f64::from(self.operations.supplier_lead_time),
        }
    }

    /// Value of the stock on hand at the supplier's unit cost.
    pub fn stock_value(&self) -> u64 {
        u64::from(self.record.quantity_available) * u64::from(self.operations.cost_per_unit)
    }
}

/// A scored row as served by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub record: InventoryRecord,
    #[serde(flatten)]
    pub operations: OperationalFields,
    pub days_to_stockout: f64,
    pub predicted_stockout_days: f64,
}

impl InventoryRow {
    pub fn is_critical(&self) -> bool {
        self.record.is_critical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(quantity_available: u32, minimum_required: u32) -> InventoryRecord {
        InventoryRecord {
            hospital_id: "HOSP-1000".into(),
            hospital_name: "Salem Govt Hospital".into(),
            city: "Salem".into(),
            latitude: 11.6643,
            longitude: 78.1460,
            item_name: "N95 Masks".into(),
            category: "PPE".into(),
            quantity_available,
            minimum_required,
            status: Some(StockStatus::from_quantities(
                quantity_available,
                minimum_required,
            )),
            expiry_date: None,
        }
    }

    #[rstest]
    #[case(0, 5, 0.0)]
    #[case(100, 0, 0.0)]
    #[case(0, 0, 0.0)]
    #[case(100, 10, 10.0)]
    #[case(15, 4, 3.75)]
    fn days_to_stockout_cases(#[case] quantity: u32, #[case] usage: u32, #[case] expected: f64) {
        let days = days_to_stockout(quantity, usage);
        assert!(days.is_finite());
        assert!(days >= 0.0);
        assert_eq!(days, expected);
    }

    #[test]
    fn status_serializes_as_written_in_csv() {
        assert_eq!(
            serde_json::to_string(&StockStatus::Critical).unwrap(),
            "\"CRITICAL\""
        );
        assert_eq!(
            serde_json::from_str::<StockStatus>("\"Normal\"").unwrap(),
            StockStatus::Normal
        );
        assert!(serde_json::from_str::<StockStatus>("\"critical\"").is_err());
    }

    #[test]
    fn stored_status_is_not_recomputed() {
        let mut row = record(10, 50);
        assert!(row.is_critical());
        assert!(!row.status_diverges());

        row.quantity_available = 80;
        assert!(!row.is_critical());
        assert_eq!(row.status, Some(StockStatus::Critical));
        assert!(row.status_diverges());
    }

    #[test]
    fn rows_without_status_never_diverge() {
        let mut row = record(10, 50);
        row.status = None;
        assert!(!row.status_diverges());
    }
}
