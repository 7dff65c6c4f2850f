//! Inter-hospital transfer suggestions.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::dataset::InventorySnapshot;
use crate::models::InventoryRow;

pub const NO_TRANSFERS_NEEDED: &str = "No hospitals require emergency stock.";

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A proposed move of one item from a surplus row to a short row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TransferSuggestion {
    pub item_name: String,
    pub donor_hospital: String,
    pub donor_hospital_id: String,
    pub donor_quantity: u32,
    pub needy_hospital: String,
    pub needy_hospital_id: String,
    pub needy_quantity: u32,
    pub needy_minimum: u32,
    /// Great-circle distance between the two sites; not used for matching
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TransferPlan {
    pub needy_rows: usize,
    pub suggestions: Vec<TransferSuggestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct RedistributionService {
    snapshot: Arc<InventorySnapshot>,
}

impl RedistributionService {
    pub fn new(snapshot: Arc<InventorySnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn plan(&self) -> TransferPlan {
        let plan = plan_transfers(self.snapshot.rows());
        info!(
            needy = plan.needy_rows,
            matched = plan.suggestions.len(),
            "Transfer plan computed"
        );
        plan
    }
}

/// For each short row, the first row of the same item holding more than
/// twice the short row's minimum, in table order. Unmatched rows are skipped.
pub fn plan_transfers(rows: &[InventoryRow]) -> TransferPlan {
    let needy: Vec<&InventoryRow> = rows.iter().filter(|row| row.is_critical()).collect();
    if needy.is_empty() {
        return TransferPlan {
            needy_rows: 0,
            suggestions: Vec::new(),
            message: Some(NO_TRANSFERS_NEEDED.to_string()),
        };
    }

    let suggestions = needy
        .iter()
        .filter_map(|short| {
            let threshold = u64::from(short.record.minimum_required) * 2;
            rows.iter()
                .find(|donor| {
                    donor.record.item_name == short.record.item_name
                        && u64::from(donor.record.quantity_available) > threshold
                })
                .map(|donor| suggestion(donor, short))
        })
        .collect();

    TransferPlan {
        needy_rows: needy.len(),
        suggestions,
        message: None,
    }
}

fn suggestion(donor: &InventoryRow, needy: &InventoryRow) -> TransferSuggestion {
    TransferSuggestion {
        item_name: needy.record.item_name.clone(),
        donor_hospital: donor.record.hospital_name.clone(),
        donor_hospital_id: donor.record.hospital_id.clone(),
        donor_quantity: donor.record.quantity_available,
        needy_hospital: needy.record.hospital_name.clone(),
        needy_hospital_id: needy.record.hospital_id.clone(),
        needy_quantity: needy.record.quantity_available,
        needy_minimum: needy.record.minimum_required,
        distance_km: haversine_km(
            donor.record.latitude,
            donor.record.longitude,
            needy.record.latitude,
            needy.record.longitude,
        ),
    }
}

pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1_rad, lat2_rad) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2_rad - lat1_rad;
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
}
