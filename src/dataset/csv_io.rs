//! CSV encoding of the inventory file.

use chrono::NaiveDate;
use serde::Deserialize;
use std::io;

use super::backfill::{OperationalColumn, PartialOperationalFields};
use crate::errors::ServiceError;
use crate::models::{InventoryRecord, OperationalFields, StockStatus};

/// Columns written by the generator, in file order
pub const BASE_COLUMNS: [&str; 11] = [
    "Hospital_ID",
    "Hospital_Name",
    "City",
    "Latitude",
    "Longitude",
    "Item_Name",
    "Category",
    "Quantity_Available",
    "Minimum_Required",
    "Status",
    "Expiry_Date",
];

/// Columns the dashboard cannot work without
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Hospital_Name",
    "Item_Name",
    "Quantity_Available",
    "Minimum_Required",
    "Latitude",
    "Longitude",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
struct CsvInventoryRow {
    #[serde(rename = "Hospital_ID", default)]
    hospital_id: String,
    #[serde(rename = "Hospital_Name")]
    hospital_name: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Item_Name")]
    item_name: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Quantity_Available")]
    quantity_available: u32,
    #[serde(rename = "Minimum_Required")]
    minimum_required: u32,
    #[serde(rename = "Status", default)]
    status: Option<StockStatus>,
    #[serde(rename = "Expiry_Date", default)]
    expiry_date: Option<NaiveDate>,
    #[serde(rename = "Daily_Usage", default)]
    daily_usage: Option<u32>,
    #[serde(rename = "Supplier_Lead_Time", default)]
    supplier_lead_time: Option<u32>,
    #[serde(rename = "Cost_Per_Unit", default)]
    cost_per_unit: Option<u32>,
    #[serde(rename = "Supplier_Name", default)]
    supplier_name: Option<String>,
}

impl CsvInventoryRow {
    fn split(self) -> (InventoryRecord, PartialOperationalFields) {
        (
            InventoryRecord {
                hospital_id: self.hospital_id,
                hospital_name: self.hospital_name,
                city: self.city,
                latitude: self.latitude,
                longitude: self.longitude,
                item_name: self.item_name,
                category: self.category,
                quantity_available: self.quantity_available,
                minimum_required: self.minimum_required,
                status: self.status,
                expiry_date: self.expiry_date,
            },
            PartialOperationalFields {
                daily_usage: self.daily_usage,
                supplier_lead_time: self.supplier_lead_time,
                cost_per_unit: self.cost_per_unit,
                supplier_name: self.supplier_name,
            },
        )
    }
}

/// Rows read from an inventory file plus the operational columns its header
/// declared.
#[derive(Debug)]
pub struct InventoryFile {
    pub rows: Vec<(InventoryRecord, PartialOperationalFields)>,
    pub operational_columns: Vec<OperationalColumn>,
}

/// Parses an inventory CSV. Fails before reading any row when a required
/// column is missing from the header.
pub fn read_inventory<R: io::Read>(reader: R) -> Result<InventoryFile, ServiceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&column| !has_column(column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ServiceError::MissingColumns(missing));
    }

    let operational_columns: Vec<OperationalColumn> = OperationalColumn::ALL
        .into_iter()
        .filter(|column| has_column(column.header()))
        .collect();

    let mut rows = Vec::new();
    for result in rdr.deserialize::<CsvInventoryRow>() {
        rows.push(result?.split());
    }

    Ok(InventoryFile {
        rows,
        operational_columns,
    })
}

/// Writes records in generator column order. When `operations` is given it
/// must hold one entry per record and the four operational columns are
/// appended.
pub fn write_inventory<W: io::Write>(
    writer: W,
    records: &[InventoryRecord],
    operations: Option<&[OperationalFields]>,
) -> Result<(), ServiceError> {
    if let Some(ops) = operations {
        if ops.len() != records.len() {
            return Err(ServiceError::ValidationError(format!(
                "{} records but {} operational rows",
                records.len(),
                ops.len()
            )));
        }
    }

    let mut wtr = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    if operations.is_some() {
        header.extend(OperationalColumn::ALL.iter().map(OperationalColumn::header));
    }
    wtr.write_record(&header)?;

    for (i, record) in records.iter().enumerate() {
        let mut fields = vec![
            record.hospital_id.clone(),
            record.hospital_name.clone(),
            record.city.clone(),
            record.latitude.to_string(),
            record.longitude.to_string(),
            record.item_name.clone(),
            record.category.clone(),
            record.quantity_available.to_string(),
            record.minimum_required.to_string(),
            record
                .status
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            record
                .expiry_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ];
        if let Some(ops) = operations.map(|ops| &ops[i]) {
            fields.push(ops.daily_usage.to_string());
            fields.push(ops.supplier_lead_time.to_string());
            fields.push(ops.cost_per_unit.to_string());
            fields.push(ops.supplier_name.clone());
        }
        wtr.write_record(&fields)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "\
Hospital_ID,Hospital_Name,City,Latitude,Longitude,Item_Name,Category,Quantity_Available,Minimum_Required,Status,Expiry_Date
HOSP-1000,Salem Govt Hospital,Salem,11.6643,78.146,N95 Masks,PPE,120,300,CRITICAL,2026-03-01
HOSP-1001,Madurai Medical College,Madurai,9.9252,78.1198,N95 Masks,PPE,900,300,Normal,2027-01-15
";

    #[test]
    fn reads_generator_output_without_operational_columns() {
        let file = read_inventory(GENERATED.as_bytes()).unwrap();
        assert_eq!(file.rows.len(), 2);
        assert!(file.operational_columns.is_empty());

        let (record, partial) = &file.rows[0];
        assert_eq!(record.hospital_id, "HOSP-1000");
        assert_eq!(record.status, Some(StockStatus::Critical));
        assert_eq!(
            record.expiry_date,
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
        assert_eq!(partial, &PartialOperationalFields::default());
    }

    #[test]
    fn missing_core_columns_are_all_reported() {
        let csv = "Hospital_Name,Item_Name,Quantity_Available,Minimum_Required\nA,B,1,2\n";
        match read_inventory(csv.as_bytes()) {
            Err(ServiceError::MissingColumns(columns)) => {
                assert_eq!(columns, vec!["Latitude", "Longitude"]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn optional_descriptive_columns_may_be_absent() {
        let csv = "\
Hospital_Name,Item_Name,Quantity_Available,Minimum_Required,Latitude,Longitude,Daily_Usage
Salem Govt Hospital,Insulin Vials,40,150,11.6643,78.146,
Salem Govt Hospital,Insulin Vials,400,150,11.6643,78.146,12
";
        let file = read_inventory(csv.as_bytes()).unwrap();
        assert_eq!(
            file.operational_columns,
            vec![OperationalColumn::DailyUsage]
        );
        assert_eq!(file.rows[0].0.hospital_id, "");
        assert_eq!(file.rows[0].0.status, None);
        assert_eq!(file.rows[0].1.daily_usage, None);
        assert_eq!(file.rows[1].1.daily_usage, Some(12));
    }

    #[test]
    fn malformed_quantity_is_a_csv_error() {
        let csv = "\
Hospital_Name,Item_Name,Quantity_Available,Minimum_Required,Latitude,Longitude
Salem Govt Hospital,Insulin Vials,-4,150,11.6643,78.146
";
        assert!(matches!(
            read_inventory(csv.as_bytes()),
            Err(ServiceError::Csv(_))
        ));
    }

    #[test]
    fn written_file_reads_back_with_operational_columns() {
        let file = read_inventory(GENERATED.as_bytes()).unwrap();
        let records: Vec<InventoryRecord> = file.rows.into_iter().map(|(r, _)| r).collect();
        let ops = vec![
            OperationalFields {
                daily_usage: 8,
                supplier_lead_time: 3,
                cost_per_unit: 75,
                supplier_name: "HealthCorp".into(),
            };
            records.len()
        ];

        let mut buffer = Vec::new();
        write_inventory(&mut buffer, &records, Some(&ops)).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with(
            "Hospital_ID,Hospital_Name,City,Latitude,Longitude,Item_Name,Category,\
Quantity_Available,Minimum_Required,Status,Expiry_Date,Daily_Usage,Supplier_Lead_Time,\
Cost_Per_Unit,Supplier_Name"
        ));

        let reread = read_inventory(buffer.as_slice()).unwrap();
        assert_eq!(reread.operational_columns.len(), 4);
        assert_eq!(reread.rows[1].0, records[1]);
        assert_eq!(reread.rows[1].1.supplier_name.as_deref(), Some("HealthCorp"));
    }

    #[test]
    fn mismatched_operational_rows_are_rejected() {
        let file = read_inventory(GENERATED.as_bytes()).unwrap();
        let records: Vec<InventoryRecord> = file.rows.into_iter().map(|(r, _)| r).collect();
        let result = write_inventory(Vec::new(), &records, Some(&[]));
        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }
}
