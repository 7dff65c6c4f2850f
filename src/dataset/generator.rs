//! Synthetic inventory generation.

use chrono::{Days, Local, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use super::backfill::{SyntheticProfile, SYNTHETIC_PROFILE_VERSION};
use super::csv_io::write_inventory;
use crate::errors::ServiceError;
use crate::models::{InventoryRecord, OperationalFields, StockStatus, HOSPITALS, SUPPLIES};

pub const DEFAULT_ROWS: usize = 1000;
pub const DEFAULT_OUTPUT: &str = "hospital_inventory.csv";

/// Share of rows drawn into the shortage range
const CRITICAL_PROBABILITY: f64 = 0.15;
const FIRST_HOSPITAL_ID: usize = 1000;
const EXPIRY_DAYS: std::ops::RangeInclusive<u64> = 5..=700;

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub rows: usize,
    /// `None` draws the seed from OS entropy
    pub seed: Option<u64>,
    pub output: PathBuf,
    pub include_operational_columns: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            include_operational_columns: false,
        }
    }
}

/// Outcome of a generator run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub rows: usize,
    pub critical_rows: usize,
    pub seed: u64,
    pub output: PathBuf,
    /// Set when operational columns were written
    pub synthetic_profile: Option<&'static str>,
}

/// Draws `options.rows` records. Hospital IDs are sequential from
/// `HOSP-1000`; the stored status reflects the quantity draw.
pub fn generate_records<R: Rng + ?Sized>(
    options: &GeneratorOptions,
    rng: &mut R,
    today: NaiveDate,
) -> Vec<InventoryRecord> {
    (0..options.rows)
        .map(|i| {
            let hospital = &HOSPITALS[rng.gen_range(0..HOSPITALS.len())];
            let item = &SUPPLIES[rng.gen_range(0..SUPPLIES.len())];
            let minimum = item.minimum_required;

            let quantity = if rng.gen_bool(CRITICAL_PROBABILITY) {
                rng.gen_range(0..minimum)
            } else {
                rng.gen_range(minimum..=minimum * 5)
            };
            let expiry = today.checked_add_days(Days::new(rng.gen_range(EXPIRY_DAYS)));

            InventoryRecord {
                hospital_id: format!("HOSP-{}", FIRST_HOSPITAL_ID + i),
                hospital_name: hospital.name.to_string(),
                city: hospital.city.to_string(),
                latitude: hospital.latitude,
                longitude: hospital.longitude,
                item_name: item.name.to_string(),
                category: item.category.to_string(),
                quantity_available: quantity,
                minimum_required: minimum,
                status: Some(StockStatus::from_quantities(quantity, minimum)),
                expiry_date: expiry,
            }
        })
        .collect()
}

/// Writes records to `path`, optionally with operational columns.
pub fn write_csv(
    path: &Path,
    records: &[InventoryRecord],
    operations: Option<&[OperationalFields]>,
) -> Result<(), ServiceError> {
    let file = File::create(path)?;
    write_inventory(BufWriter::new(file), records, operations)
}

/// Generates a dataset and writes it to `options.output`.
#[instrument(skip(options), fields(rows = options.rows, output = %options.output.display()))]
pub fn generate_dataset(options: &GeneratorOptions) -> Result<GenerationSummary, ServiceError> {
    let seed = options.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let records = generate_records(options, &mut rng, Local::now().date_naive());

    let operations: Option<Vec<OperationalFields>> = options.include_operational_columns.then(|| {
        let mut profile = SyntheticProfile::new(seed);
        records.iter().map(|_| profile.draw()).collect()
    });

    write_csv(&options.output, &records, operations.as_deref())?;

    let summary = GenerationSummary {
        rows: records.len(),
        critical_rows: records.iter().filter(|r| r.is_critical()).count(),
        seed,
        output: options.output.clone(),
        synthetic_profile: operations.as_ref().map(|_| SYNTHETIC_PROFILE_VERSION),
    };
    info!(
        rows = summary.rows,
        critical = summary.critical_rows,
        seed,
        "Dataset written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn draw(rows: usize, seed: u64) -> Vec<InventoryRecord> {
        let options = GeneratorOptions {
            rows,
            ..GeneratorOptions::default()
        };
        generate_records(&options, &mut StdRng::seed_from_u64(seed), today())
    }

    #[test]
    fn default_run_has_sequential_unique_ids() {
        let records = draw(DEFAULT_ROWS, 1);
        assert_eq!(records.len(), 1000);
        assert_eq!(records[0].hospital_id, "HOSP-1000");
        assert_eq!(records[999].hospital_id, "HOSP-1999");
        let ids: HashSet<&str> = records.iter().map(|r| r.hospital_id.as_str()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn status_matches_quantity_draw() {
        for record in draw(2000, 9) {
            let critical = record.quantity_available < record.minimum_required;
            assert_eq!(record.status == Some(StockStatus::Critical), critical);
            assert!(record.quantity_available <= record.minimum_required * 5);
        }
    }

    #[test]
    fn shortage_share_is_near_fifteen_percent() {
        let records = draw(5000, 3);
        let critical = records.iter().filter(|r| r.is_critical()).count();
        let share = critical as f64 / records.len() as f64;
        assert!((0.12..0.18).contains(&share), "share {}", share);
    }

    #[test]
    fn expiry_dates_fall_in_window() {
        let earliest = today() + Days::new(5);
        let latest = today() + Days::new(700);
        for record in draw(500, 5) {
            let expiry = record.expiry_date.unwrap();
            assert!(expiry >= earliest && expiry <= latest);
        }
    }

    #[test]
    fn rows_use_catalog_positions() {
        for record in draw(200, 11) {
            let site = HOSPITALS
                .iter()
                .find(|h| h.name == record.hospital_name)
                .unwrap();
            assert_eq!(site.latitude, record.latitude);
            assert_eq!(site.city, record.city);
        }
    }
}
