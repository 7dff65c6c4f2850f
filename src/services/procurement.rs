//! Reorder quantities and purchase-order text for short rows.

use serde::Serialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::dataset::InventorySnapshot;
use crate::models::InventoryRow;

pub const NO_PROCUREMENT_NEEDED: &str = "No procurement needed.";
pub const PO_HEADER: &str = "URGENT PURCHASE REQUEST";

/// Reorder target as a multiple of the minimum requirement
const TARGET_MULTIPLIER: u64 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProcurementLine {
    pub hospital_name: String,
    pub item_name: String,
    pub supplier_name: String,
    pub suggested_order_qty: u64,
    pub estimated_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProcurementPlan {
    pub lines: Vec<ProcurementLine>,
    pub total_estimated_cost: u64,
    /// Absent when nothing needs ordering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct ProcurementService {
    snapshot: Arc<InventorySnapshot>,
}

impl ProcurementService {
    pub fn new(snapshot: Arc<InventorySnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn plan(&self) -> ProcurementPlan {
        let plan = plan_procurement(self.snapshot.rows());
        info!(
            lines = plan.lines.len(),
            total_cost = plan.total_estimated_cost,
            "Procurement plan computed"
        );
        plan
    }
}

/// Units needed to lift a row to three times its minimum. Widened to `u64`
/// so any `u32` minimum is representable.
pub fn suggested_order_qty(quantity_available: u32, minimum_required: u32) -> u64 {
    (u64::from(minimum_required) * TARGET_MULTIPLIER).saturating_sub(u64::from(quantity_available))
}

pub fn plan_procurement(rows: &[InventoryRow]) -> ProcurementPlan {
    let lines: Vec<ProcurementLine> = rows
        .iter()
        .filter(|row| row.is_critical())
        .map(|row| {
            let qty = suggested_order_qty(row.record.quantity_available, row.record.minimum_required);
            ProcurementLine {
                hospital_name: row.record.hospital_name.clone(),
                item_name: row.record.item_name.clone(),
                supplier_name: row.operations.supplier_name.clone(),
                suggested_order_qty: qty,
                estimated_cost: qty.saturating_mul(u64::from(row.operations.cost_per_unit)),
            }
        })
        .collect();

    if lines.is_empty() {
        return ProcurementPlan {
            lines,
            total_estimated_cost: 0,
            purchase_order: None,
            message: Some(NO_PROCUREMENT_NEEDED.to_string()),
        };
    }

    ProcurementPlan {
        total_estimated_cost: lines.iter().map(|line| line.estimated_cost).sum(),
        purchase_order: Some(purchase_order_text(&lines)),
        lines,
        message: None,
    }
}

pub fn purchase_order_text(lines: &[ProcurementLine]) -> String {
    let mut po = format!("{}\n\n", PO_HEADER);
    for line in lines {
        let _ = writeln!(
            po,
            "- {} | {} | Qty: {}",
            line.hospital_name, line.item_name, line.suggested_order_qty
        );
    }
    po
}
