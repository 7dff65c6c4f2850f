//! Seeded synthesis of the operational columns.
//!
//! The same [`SyntheticProfile`] feeds both the generator and the load-time
//! backfill, so a file written with operational columns and a file backfilled
//! on load with the same seed carry identical values.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::models::{InventoryRecord, OperationalFields, StockedRecord, SUPPLIERS};

/// Bumped whenever a distribution below changes.
pub const SYNTHETIC_PROFILE_VERSION: &str = "synthetic-ops/v1";

const DAILY_USAGE_RANGE: std::ops::RangeInclusive<u32> = 5..=19;
const LEAD_TIME_RANGE: std::ops::RangeInclusive<u32> = 2..=9;
const COST_PER_UNIT_RANGE: std::ops::RangeInclusive<u32> = 50..=499;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum OperationalColumn {
    #[serde(rename = "Daily_Usage")]
    DailyUsage,
    #[serde(rename = "Supplier_Lead_Time")]
    SupplierLeadTime,
    #[serde(rename = "Cost_Per_Unit")]
    CostPerUnit,
    #[serde(rename = "Supplier_Name")]
    SupplierName,
}

impl OperationalColumn {
    pub const ALL: [OperationalColumn; 4] = [
        OperationalColumn::DailyUsage,
        OperationalColumn::SupplierLeadTime,
        OperationalColumn::CostPerUnit,
        OperationalColumn::SupplierName,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            OperationalColumn::DailyUsage => "Daily_Usage",
            OperationalColumn::SupplierLeadTime => "Supplier_Lead_Time",
            OperationalColumn::CostPerUnit => "Cost_Per_Unit",
            OperationalColumn::SupplierName => "Supplier_Name",
        }
    }

    fn stream_id(&self) -> u64 {
        match self {
            OperationalColumn::DailyUsage => 1,
            OperationalColumn::SupplierLeadTime => 2,
            OperationalColumn::CostPerUnit => 3,
            OperationalColumn::SupplierName => 4,
        }
    }
}

/// Versioned distributions for the operational columns, one RNG stream per
/// column so that synthesizing one column never shifts another.
pub struct SyntheticProfile {
    daily_usage: StdRng,
    supplier_lead_time: StdRng,
    cost_per_unit: StdRng,
    supplier_name: StdRng,
}

impl SyntheticProfile {
    pub fn new(seed: u64) -> Self {
        Self {
            daily_usage: column_stream(seed, OperationalColumn::DailyUsage),
            supplier_lead_time: column_stream(seed, OperationalColumn::SupplierLeadTime),
            cost_per_unit: column_stream(seed, OperationalColumn::CostPerUnit),
            supplier_name: column_stream(seed, OperationalColumn::SupplierName),
        }
    }

    pub fn daily_usage(&mut self) -> u32 {
        self.daily_usage.gen_range(DAILY_USAGE_RANGE)
    }

    pub fn supplier_lead_time(&mut self) -> u32 {
        self.supplier_lead_time.gen_range(LEAD_TIME_RANGE)
    }

    pub fn cost_per_unit(&mut self) -> u32 {
        self.cost_per_unit.gen_range(COST_PER_UNIT_RANGE)
    }

    pub fn supplier_name(&mut self) -> String {
        SUPPLIERS
            .choose(&mut self.supplier_name)
            .copied()
            .unwrap_or(SUPPLIERS[0])
            .to_string()
    }

    /// Draws a complete set of operational values for one row.
    pub fn draw(&mut self) -> OperationalFields {
        OperationalFields {
            daily_usage: self.daily_usage(),
            supplier_lead_time: self.supplier_lead_time(),
            cost_per_unit: self.cost_per_unit(),
            supplier_name: self.supplier_name(),
        }
    }
}

fn column_stream(seed: u64, column: OperationalColumn) -> StdRng {
    StdRng::seed_from_u64(seed ^ column.stream_id().wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Operational values as read from a file; `None` marks a missing cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialOperationalFields {
    pub daily_usage: Option<u32>,
    pub supplier_lead_time: Option<u32>,
    pub cost_per_unit: Option<u32>,
    pub supplier_name: Option<String>,
}

/// What the backfill synthesized, surfaced in logs and the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BackfillReport {
    pub profile_version: String,
    pub seed: u64,
    /// Columns absent from the file and synthesized in full
    pub synthesized_columns: Vec<OperationalColumn>,
    /// Empty cells filled inside columns that were present
    pub filled_cells: usize,
}

impl BackfillReport {
    pub fn is_empty(&self) -> bool {
        self.synthesized_columns.is_empty() && self.filled_cells == 0
    }
}

/// Resolves every row's operational values, drawing the missing ones from
/// the seeded profile.
///
/// `present` lists the operational columns found in the file header; a column
/// not in it is reported as synthesized even if the file had zero rows.
pub fn backfill(
    rows: Vec<(InventoryRecord, PartialOperationalFields)>,
    present: &[OperationalColumn],
    seed: u64,
) -> (Vec<StockedRecord>, BackfillReport) {
    let mut profile = SyntheticProfile::new(seed);
    let mut filled_cells = 0usize;
    let mut count_fill = |column: OperationalColumn| {
        if present.contains(&column) {
            filled_cells += 1;
        }
    };

    let stocked: Vec<StockedRecord> = rows
        .into_iter()
        .map(|(record, partial)| {
            let daily_usage = partial.daily_usage.unwrap_or_else(|| {
                count_fill(OperationalColumn::DailyUsage);
                profile.daily_usage()
            });
            let supplier_lead_time = partial.supplier_lead_time.unwrap_or_else(|| {
                count_fill(OperationalColumn::SupplierLeadTime);
                profile.supplier_lead_time()
            });
            let cost_per_unit = partial.cost_per_unit.unwrap_or_else(|| {
                count_fill(OperationalColumn::CostPerUnit);
                profile.cost_per_unit()
            });
            let supplier_name = partial
                .supplier_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| {
                    count_fill(OperationalColumn::SupplierName);
                    profile.supplier_name()
                });

            StockedRecord {
                record,
                operations: OperationalFields {
                    daily_usage,
                    supplier_lead_time,
                    cost_per_unit,
                    supplier_name,
                },
            }
        })
        .collect();

    let synthesized_columns: Vec<OperationalColumn> = OperationalColumn::ALL
        .into_iter()
        .filter(|column| !present.contains(column))
        .collect();

    let report = BackfillReport {
        profile_version: SYNTHETIC_PROFILE_VERSION.to_string(),
        seed,
        synthesized_columns,
        filled_cells,
    };

    if !report.synthesized_columns.is_empty() {
        let names: Vec<&str> = report
            .synthesized_columns
            .iter()
            .map(OperationalColumn::header)
            .collect();
        warn!(
            columns = ?names,
            seed,
            profile = SYNTHETIC_PROFILE_VERSION,
            rows = stocked.len(),
            "Inventory file lacks operational columns; synthesizing them"
        );
    }
    if report.filled_cells > 0 {
        warn!(
            cells = report.filled_cells,
            seed,
            profile = SYNTHETIC_PROFILE_VERSION,
            "Filled empty operational cells with synthetic values"
        );
    }
    if report.is_empty() {
        info!("All operational columns present; no backfill needed");
    }

    (stocked, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: usize) -> InventoryRecord {
        InventoryRecord {
            hospital_id: format!("HOSP-{}", 1000 + id),
            hospital_name: "Salem Govt Hospital".into(),
            city: "Salem".into(),
            latitude: 11.6643,
            longitude: 78.1460,
            item_name: "Paracetamol IV".into(),
            category: "Medicine".into(),
            quantity_available: 250,
            minimum_required: 200,
            status: None,
            expiry_date: None,
        }
    }

    fn bare_rows(n: usize) -> Vec<(InventoryRecord, PartialOperationalFields)> {
        (0..n)
            .map(|i| (record(i), PartialOperationalFields::default()))
            .collect()
    }

    #[test]
    fn synthesized_values_stay_in_profile_ranges() {
        let (stocked, report) = backfill(bare_rows(500), &[], 42);
        assert_eq!(report.synthesized_columns.len(), 4);
        assert_eq!(report.filled_cells, 0);
        for row in &stocked {
            let ops = &row.operations;
            assert!(DAILY_USAGE_RANGE.contains(&ops.daily_usage));
            assert!(LEAD_TIME_RANGE.contains(&ops.supplier_lead_time));
            assert!(COST_PER_UNIT_RANGE.contains(&ops.cost_per_unit));
            assert!(SUPPLIERS.contains(&ops.supplier_name.as_str()));
        }
    }

    #[test]
    fn same_seed_reproduces_columns() {
        let (a, _) = backfill(bare_rows(50), &[], 7);
        let (b, _) = backfill(bare_rows(50), &[], 7);
        let (c, _) = backfill(bare_rows(50), &[], 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn present_values_are_kept_and_gaps_counted() {
        let mut rows = bare_rows(3);
        rows[0].1 = PartialOperationalFields {
            daily_usage: Some(0),
            supplier_lead_time: Some(3),
            cost_per_unit: Some(99),
            supplier_name: Some("Local Depot".into()),
        };
        rows[1].1.daily_usage = Some(11);

        let present = [
            OperationalColumn::DailyUsage,
            OperationalColumn::SupplierLeadTime,
        ];
        let (stocked, report) = backfill(rows, &present, 42);

        assert_eq!(stocked[0].operations.daily_usage, 0);
        assert_eq!(stocked[0].operations.supplier_name, "Local Depot");
        assert_eq!(stocked[1].operations.daily_usage, 11);
        // row 2 daily usage + rows 1,2 lead time
        assert_eq!(report.filled_cells, 3);
        assert_eq!(
            report.synthesized_columns,
            vec![OperationalColumn::CostPerUnit, OperationalColumn::SupplierName]
        );
    }

    #[test]
    fn one_column_stream_does_not_shift_another() {
        let (all_missing, _) = backfill(bare_rows(20), &[], 42);

        let mut rows = bare_rows(20);
        for (_, partial) in rows.iter_mut() {
            partial.daily_usage = Some(10);
        }
        let (usage_present, _) = backfill(rows, &[OperationalColumn::DailyUsage], 42);

        for (a, b) in all_missing.iter().zip(&usage_present) {
            assert_eq!(a.operations.cost_per_unit, b.operations.cost_per_unit);
            assert_eq!(a.operations.supplier_name, b.operations.supplier_name);
        }
    }
}
