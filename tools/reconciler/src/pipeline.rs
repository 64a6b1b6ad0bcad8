//! End-to-end run orchestration
//!
//! Reads every input, computes the full allocation, then writes every
//! output. Nothing is persisted until the whole computation has
//! succeeded, so a fatal failure leaves no partial output behind.

use crate::config::RunConfig;
use crate::discover;
use crate::reports;
use crate::sources;
use allocation_engine::{
    aggregate, allocate, apply_consumption, build_pool, fold_consumption, summarize, Denylist,
};
use anyhow::Context;
use chrono::Local;
use csv::WriterBuilder;
use persistence::ledger::{COL_ITEM, COL_ORDER, COL_ORDERED_AT, COL_QTY};
use std::fs;
use std::path::{Path, PathBuf};
use types::ids::RunId;
use types::quantity::Quantity;
use types::records::{AllocationRow, UnfulfilledRecord};

/// Current-run allocation table (overwritten every run)
pub const ALLOCATIONS_CSV: &str = "overstock_allocations.csv";
/// Append-only consumption ledger
pub const HISTORY_CSV: &str = "overstock_allocations_history.csv";
/// Unfulfilled-demand table (overwritten every run)
pub const UNFILLED_CSV: &str = "overstock_unfilled.csv";
/// Wholesaler credit export, tab-separated
pub const CREDIT_TXT: &str = "overstock_credit_format.txt";
/// Wholesaler credit export, rich-text table
pub const CREDIT_HTML: &str = "overstock_credit_format.html";
/// Return-request email body
pub const EMAIL_TXT: &str = "overstock_return_email.txt";

/// What one run produced
#[derive(Debug)]
pub struct RunSummary {
    /// The return-request export the run worked from
    pub request_file: PathBuf,
    pub run_id: RunId,
    /// Allocation rows in this batch
    pub allocated_rows: usize,
    /// Total units allocated this run
    pub allocated_units: Quantity,
    /// Items with demand left unsatisfied
    pub unfulfilled_items: usize,
}

/// Execute one full reconciliation run
pub fn run(config: &RunConfig) -> anyhow::Result<RunSummary> {
    fs::create_dir_all(&config.input_dir)
        .with_context(|| format!("creating input dir {}", config.input_dir.display()))?;
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating output dir {}", config.out_dir.display()))?;

    let request_file = discover::newest_request_file(&config.input_dir, &config.input_marker)?;
    tracing::info!(file = %request_file.display(), "reconciling newest return-request export");

    let demand = aggregate(sources::read_return_requests(&request_file, &config.columns)?);
    tracing::info!(items = demand.len(), "aggregated return demand");

    let denylist = Denylist::from_raw(&config.exclude_orders);
    let order_rows = sources::read_order_log(&config.order_log, &config.columns)?;
    let pool = build_pool(order_rows, &demand, &denylist);
    tracing::info!(records = pool.len(), excluded_orders = denylist.len(), "built supply pool");

    let history_path = config.out_dir.join(HISTORY_CSV);
    let history = persistence::read_history(&history_path)?;
    let used = fold_consumption(&history, &denylist);
    let pool = apply_consumption(pool, &used);
    tracing::info!(
        prior_rows = history.len(),
        records = pool.len(),
        "deducted prior consumption from pool"
    );

    let outcome = allocate(&demand, pool);
    let summary_rows = summarize(&outcome.allocations);

    // Render everything before the first write.
    let credit_text = reports::credit_text(&summary_rows);
    let credit_html = reports::credit_html(&summary_rows);
    let email = reports::email_body(&summary_rows, &config.email_greeting, &config.email_signature);

    let run_id = RunId::new();
    let logged_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    write_allocations(&config.out_dir.join(ALLOCATIONS_CSV), &outcome.allocations)?;
    write_unfulfilled(&config.out_dir.join(UNFILLED_CSV), &outcome.unfulfilled)?;
    persistence::append_batch(&history_path, &outcome.allocations, &logged_at, &run_id)?;
    fs::write(config.out_dir.join(CREDIT_TXT), credit_text).context("writing credit text")?;
    fs::write(config.out_dir.join(CREDIT_HTML), credit_html).context("writing credit html")?;
    fs::write(config.out_dir.join(EMAIL_TXT), email).context("writing email body")?;
    tracing::info!(out_dir = %config.out_dir.display(), "outputs written, ledger appended");

    Ok(RunSummary {
        request_file,
        run_id,
        allocated_rows: outcome.allocations.len(),
        allocated_units: outcome.allocations.iter().map(|row| row.allocated).sum(),
        unfulfilled_items: outcome.unfulfilled.len(),
    })
}

/// Write the current-run allocation table, overwriting any previous run
fn write_allocations(path: &Path, batch: &[AllocationRow]) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.write_record([COL_ORDER, COL_ORDERED_AT, COL_ITEM, COL_QTY])?;
    for row in batch {
        let qty = row.allocated.to_string();
        writer.write_record([
            row.order.as_str(),
            row.ordered_at.as_str(),
            row.item.as_str(),
            qty.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the unfulfilled-demand table, overwriting any previous run
fn write_unfulfilled(path: &Path, unfulfilled: &[UnfulfilledRecord]) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("writing {}", path.display()))?;
    writer.write_record([COL_ITEM, "Qty Unfilled"])?;
    for record in unfulfilled {
        let qty = record.remaining.to_string();
        writer.write_record([record.item.as_str(), qty.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
