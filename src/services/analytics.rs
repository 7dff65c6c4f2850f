use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use utoipa::ToSchema;

use crate::dataset::InventorySnapshot;
use crate::models::InventoryRow;

/// Headline KPIs for the dashboard overview
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardOverview {
    pub hospital_count: usize,
    pub total_stock: u64,
    pub critical_count: usize,
    /// Sum of quantity × unit cost, in rupees
    pub inventory_value: u64,
    /// `inventory_value` formatted as `₹1,234,567`
    pub inventory_value_display: String,
    pub critical_alert: bool,
    pub generated_at: DateTime<Utc>,
}

/// One map point per inventory row
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MapMarker {
    pub hospital_name: String,
    pub item_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub quantity_available: u32,
    pub critical: bool,
    /// Marker radius, proportional to the item's minimum requirement
    pub size: u32,
}

/// Aggregate metrics over the snapshot
#[derive(Clone)]
pub struct AnalyticsService {
    snapshot: Arc<InventorySnapshot>,
}

impl AnalyticsService {
    pub fn new(snapshot: Arc<InventorySnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn overview(&self) -> DashboardOverview {
        let overview = build_overview(self.snapshot.rows());
        debug!(
            critical = overview.critical_count,
            hospitals = overview.hospital_count,
            "Overview computed"
        );
        overview
    }

    pub fn map_markers(&self) -> Vec<MapMarker> {
        map_markers(self.snapshot.rows())
    }
}

pub fn build_overview(rows: &[InventoryRow]) -> DashboardOverview {
    let hospital_count = rows
        .iter()
        .map(|row| row.record.hospital_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_stock = rows
        .iter()
        .map(|row| u64::from(row.record.quantity_available))
        .sum();
    let critical_count = rows.iter().filter(|row| row.is_critical()).count();
    let inventory_value = rows
        .iter()
        .map(|row| {
            u64::from(row.record.quantity_available) * u64::from(row.operations.cost_per_unit)
        })
        .sum();

    DashboardOverview {
        hospital_count,
        total_stock,
        critical_count,
        inventory_value,
        inventory_value_display: format_rupees(inventory_value),
        critical_alert: critical_count > 0,
        generated_at: Utc::now(),
    }
}

pub fn map_markers(rows: &[InventoryRow]) -> Vec<MapMarker> {
    rows.iter()
        .map(|row| MapMarker {
            hospital_name: row.record.hospital_name.clone(),
            item_name: row.record.item_name.clone(),
            latitude: row.record.latitude,
            longitude: row.record.longitude,
            quantity_available: row.record.quantity_available,
            critical: row.is_critical(),
            size: row.record.minimum_required,
        })
        .collect()
}

/// Formats an amount with a rupee sign and thousands separators.
pub fn format_rupees(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("₹{}", grouped)
}
