//! Domain types for the hospital supply inventory.

pub mod catalog;
pub mod inventory;

pub use catalog::{HospitalSite, SupplyItem, HOSPITALS, SUPPLIERS, SUPPLIES};
pub use inventory::{
    days_to_stockout, InventoryRecord, InventoryRow, OperationalFields, StockStatus, StockedRecord,
};
