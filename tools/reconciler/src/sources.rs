//! Source export readers
//!
//! CSV adapters for the return-request export and the completed-order
//! log. Row-level problems are left to the engine's lenient parsers;
//! this layer only decides which failures are fatal: a missing order log
//! or a log without its items column aborts, a request file without the
//! expected columns just yields no demand.

use crate::config::SourceColumns;
use allocation_engine::{OrderLogRow, RawDemand};
use anyhow::Context;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;
use types::errors::SourceError;

/// Locate a column by name, tolerating a UTF-8 BOM on the first header
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}') == name)
}

fn field(row: &StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).unwrap_or("").to_string()
}

/// Read the return-request export into raw demand pairs
///
/// A file without the configured item or quantity column yields zero
/// rows (and a warning); the engine treats that as empty demand.
pub fn read_return_requests(
    path: &Path,
    columns: &SourceColumns,
) -> anyhow::Result<Vec<RawDemand>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening return requests {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let item_idx = column_index(&headers, &columns.request_item);
    let qty_idx = column_index(&headers, &columns.request_qty);
    if item_idx.is_none() || qty_idx.is_none() {
        tracing::warn!(
            file = %path.display(),
            item_column = %columns.request_item,
            qty_column = %columns.request_qty,
            "return-request export missing expected columns, treating as empty demand"
        );
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result?;
        rows.push(RawDemand {
            item: field(&row, item_idx),
            qty: field(&row, qty_idx),
        });
    }

    tracing::info!(rows = rows.len(), file = %path.display(), "read return requests");
    Ok(rows)
}

/// Read the completed-order log
///
/// A missing file is fatal (the run cannot allocate without supply), as
/// is a log without the embedded items column. The id, confirmation,
/// and timestamp columns are optional; absent ones read as empty fields
/// and the engine's filters take it from there.
pub fn read_order_log(path: &Path, columns: &SourceColumns) -> anyhow::Result<Vec<OrderLogRow>> {
    if !path.exists() {
        return Err(SourceError::OrderLogMissing {
            path: path.display().to_string(),
        }
        .into());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening order log {}", path.display()))?;
    let headers = reader.headers()?.clone();

    let items_idx = column_index(&headers, &columns.items_cell);
    if items_idx.is_none() {
        return Err(SourceError::MissingColumn {
            column: columns.items_cell.clone(),
            source: path.display().to_string(),
        }
        .into());
    }
    let order_idx = column_index(&headers, &columns.order_id);
    let confirmation_idx = column_index(&headers, &columns.confirmation_id);
    let ordered_at_idx = column_index(&headers, &columns.ordered_at);

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result?;
        rows.push(OrderLogRow {
            order_id: field(&row, order_idx),
            confirmation_id: field(&row, confirmation_idx),
            ordered_at: field(&row, ordered_at_idx),
            items_cell: field(&row, items_idx),
        });
    }

    tracing::info!(rows = rows.len(), file = %path.display(), "read order log");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn columns() -> SourceColumns {
        SourceColumns::default()
    }

    #[test]
    fn test_read_return_requests() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Overstock.csv");
        fs::write(&path, "Barcode,Quantity\n000111,5\n000222,3\n").unwrap();

        let rows = read_return_requests(&path, &columns()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].item, "000111");
        assert_eq!(rows[0].qty, "5");
    }

    #[test]
    fn test_return_requests_with_bom_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Overstock.csv");
        fs::write(&path, "\u{feff}Barcode,Quantity\n000111,5\n").unwrap();

        let rows = read_return_requests(&path, &columns()).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_return_requests_missing_columns_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Overstock.csv");
        fs::write(&path, "SKU,Amount\n000111,5\n").unwrap();

        let rows = read_return_requests(&path, &columns()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_read_order_log_with_embedded_items() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("orders.csv");
        fs::write(
            &path,
            "Order ID,Thank You Confirmation,Date Time Ordered,Combined ISBN X Quantity + Add Ons\n\
             100,,2024-01-01 00:00:00,\"000111, 2\n000222, 3\"\n",
        )
        .unwrap();

        let rows = read_order_log(&path, &columns()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, "100");
        assert!(rows[0].items_cell.contains("000222"));
    }

    #[test]
    fn test_order_log_missing_file_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = read_order_log(&tmp.path().join("orders.csv"), &columns()).unwrap_err();
        assert!(err.downcast_ref::<SourceError>().is_some());
    }

    #[test]
    fn test_order_log_missing_items_column_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("orders.csv");
        fs::write(&path, "Order ID,Date Time Ordered\n100,2024-01-01\n").unwrap();

        let err = read_order_log(&path, &columns()).unwrap_err();
        match err.downcast_ref::<SourceError>() {
            Some(SourceError::MissingColumn { column, .. }) => {
                assert_eq!(column, "Combined ISBN X Quantity + Add Ons");
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }
}
