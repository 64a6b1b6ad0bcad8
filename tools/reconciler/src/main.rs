use clap::Parser;
use reconciler::config::RunConfig;
use reconciler::pipeline;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reconciler")]
#[command(about = "Reconcile overstock-return requests against the completed-order ledger")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory scanned for the newest return-request export
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory receiving every output file
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Completed-orders export path
    #[arg(long)]
    order_log: Option<PathBuf>,

    /// Order id excluded from allocation and reconciliation (repeatable)
    #[arg(long = "exclude-order", value_name = "ORDER_ID")]
    exclude_orders: Vec<String>,
}

fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(dir) = args.out_dir {
        config.out_dir = dir;
    }
    if let Some(path) = args.order_log {
        config.order_log = path;
    }
    config.exclude_orders.extend(args.exclude_orders);

    let summary = pipeline::run(&config)?;

    tracing::info!(
        run_id = %summary.run_id,
        allocations = summary.allocated_rows,
        units = %summary.allocated_units,
        unfulfilled_items = summary.unfulfilled_items,
        "reconciliation complete"
    );

    Ok(())
}
