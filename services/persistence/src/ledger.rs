//! Ledger store — append-only allocation history in CSV form
//!
//! One row per allocation, columns shared with the legacy exports that
//! consume the file. Rows are only ever appended; an absent file is a
//! valid initial state (no consumption yet).
//!
//! Reads are tolerant of extra columns but not of missing ones: a ledger
//! that lost its required columns reads as empty history, and empty
//! history means quantities that already shipped get allocated again.
//! Schema drift therefore aborts the run instead.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::OpenOptions;
use std::path::Path;
use thiserror::Error;
use types::ids::{ItemId, OrderId, RunId};
use types::quantity::Quantity;
use types::records::{AllocationRow, ConsumptionRecord};

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("ledger {path} is missing required columns: {missing:?}")]
    SchemaMismatch { path: String, missing: Vec<String> },
}

// ── Schema ──────────────────────────────────────────────────────────

/// Order identifier column
pub const COL_ORDER: &str = "Order Number";
/// Order placement timestamp column
pub const COL_ORDERED_AT: &str = "Date Time Ordered";
/// Item identifier column
pub const COL_ITEM: &str = "UPC";
/// Allocated quantity column
pub const COL_QTY: &str = "Qty";
/// Batch write timestamp column (write-only; ignored on read)
pub const COL_LOGGED_AT: &str = "log_added_at";
/// Run identifier column (write-only; ignored on read)
pub const COL_RUN: &str = "run_id";

/// Columns a readable ledger must carry
const REQUIRED_COLUMNS: &[&str] = &[COL_ORDER, COL_ITEM, COL_QTY];

/// Locate a column by name, tolerating a UTF-8 BOM on the first header
fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}') == name)
}

// ── Reading ─────────────────────────────────────────────────────────

/// Read the full consumption history
///
/// An absent ledger is an empty history. Identifier and quantity fields
/// normalize and coerce at this boundary, so downstream reconciliation
/// keys match the supply pool exactly. Extra columns are ignored;
/// missing required columns are a [`LedgerError::SchemaMismatch`].
pub fn read_history(path: &Path) -> Result<Vec<ConsumptionRecord>, LedgerError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no ledger yet, starting with empty history");
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| column_index(&headers, name).is_none())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LedgerError::SchemaMismatch {
            path: path.display().to_string(),
            missing,
        });
    }

    let order_idx = column_index(&headers, COL_ORDER).unwrap_or(0);
    let item_idx = column_index(&headers, COL_ITEM).unwrap_or(0);
    let qty_idx = column_index(&headers, COL_QTY).unwrap_or(0);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(ConsumptionRecord {
            order: OrderId::normalize(row.get(order_idx).unwrap_or("")),
            item: ItemId::normalize(row.get(item_idx).unwrap_or("")),
            consumed: Quantity::coerce(row.get(qty_idx).unwrap_or("")),
        });
    }

    tracing::debug!(rows = records.len(), "read consumption history");
    Ok(records)
}

// ── Appending ───────────────────────────────────────────────────────

/// Append one run's allocation batch to the ledger
///
/// Creates the file with a header row when absent; otherwise appends
/// rows only. Existing rows are never touched. Every row is stamped
/// with the batch timestamp and run id.
pub fn append_batch(
    path: &Path,
    batch: &[AllocationRow],
    logged_at: &str,
    run: &RunId,
) -> Result<(), LedgerError> {
    let new_file = !path.exists();
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

    if new_file {
        writer.write_record([COL_ORDER, COL_ORDERED_AT, COL_ITEM, COL_QTY, COL_LOGGED_AT, COL_RUN])?;
    }

    let run_field = run.to_string();
    for row in batch {
        let qty = row.allocated.to_string();
        writer.write_record([
            row.order.as_str(),
            row.ordered_at.as_str(),
            row.item.as_str(),
            qty.as_str(),
            logged_at,
            run_field.as_str(),
        ])?;
    }

    writer.flush()?;
    tracing::debug!(rows = batch.len(), path = %path.display(), "appended allocation batch");
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────
