use chrono::{DateTime, Utc};

use super::backfill::BackfillReport;
use crate::ml::{score_records, StockoutModel};
use crate::models::{InventoryRow, StockedRecord};

/// The scored inventory table, frozen after startup and shared read-only by
/// every request.
#[derive(Debug, Clone)]
pub struct InventorySnapshot {
    rows: Vec<InventoryRow>,
    backfill: BackfillReport,
    model_version: String,
    status_divergences: usize,
    loaded_at: DateTime<Utc>,
}

impl InventorySnapshot {
    /// Scores `records` with `model` and freezes the result.
    pub fn build(
        records: Vec<StockedRecord>,
        backfill: BackfillReport,
        model: &dyn StockoutModel,
    ) -> Self {
        let status_divergences = records
            .iter()
            .filter(|stocked| stocked.record.status_diverges())
            .count();

        Self {
            rows: score_records(model, records),
            backfill,
            model_version: model.model_version().to_string(),
            status_divergences,
            loaded_at: Utc::now(),
        }
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn backfill(&self) -> &BackfillReport {
        &self.backfill
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Rows whose stored status disagrees with the live quantity check.
    pub fn status_divergences(&self) -> usize {
        self.status_divergences
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Rows below their minimum, in table order.
    pub fn critical_rows(&self) -> impl Iterator<Item = &InventoryRow> {
        self.rows.iter().filter(|row| row.is_critical())
    }

    /// Distinct hospital names in first-appearance order.
    pub fn hospitals(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            let name = row.record.hospital_name.as_str();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Distinct items stocked by `hospital`, in first-appearance order.
    pub fn items_for_hospital(&self, hospital: &str) -> Vec<&str> {
        let mut items: Vec<&str> = Vec::new();
        for row in self
            .rows
            .iter()
            .filter(|row| row.record.hospital_name == hospital)
        {
            let item = row.record.item_name.as_str();
            if !items.contains(&item) {
                items.push(item);
            }
        }
        items
    }

    /// First row for the (hospital, item) pair.
    pub fn find(&self, hospital: &str, item: &str) -> Option<&InventoryRow> {
        self.rows
            .iter()
            .find(|row| row.record.hospital_name == hospital && row.record.item_name == item)
    }
}
