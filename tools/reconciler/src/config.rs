//! Run configuration
//!
//! Plain serde structs with defaults; optionally loaded from a JSON file
//! and overridden by CLI flags. The denylist lives here: excluded orders
//! are part of site configuration, not of the data.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Column names expected in the source exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    /// Item identifier column in the return-request export
    pub request_item: String,
    /// Quantity column in the return-request export
    pub request_qty: String,
    /// Primary order identifier column in the order log
    pub order_id: String,
    /// Secondary confirmation identifier column in the order log
    pub confirmation_id: String,
    /// Order placement timestamp column in the order log
    pub ordered_at: String,
    /// Embedded item-list column in the order log
    pub items_cell: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            request_item: "Barcode".to_string(),
            request_qty: "Quantity".to_string(),
            order_id: "Order ID".to_string(),
            confirmation_id: "Thank You Confirmation".to_string(),
            ordered_at: "Date Time Ordered".to_string(),
            items_cell: "Combined ISBN X Quantity + Add Ons".to_string(),
        }
    }
}

/// Full configuration for one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory scanned for the newest return-request export
    pub input_dir: PathBuf,
    /// Directory receiving every output file
    pub out_dir: PathBuf,
    /// Path to the completed-orders export
    pub order_log: PathBuf,
    /// Filename marker identifying return-request exports
    pub input_marker: String,
    /// Raw order identifiers excluded from allocation and reconciliation
    pub exclude_orders: Vec<String>,
    /// Source column names
    pub columns: SourceColumns,
    /// Greeting line for the generated return-request email
    pub email_greeting: String,
    /// Signature block for the generated return-request email
    pub email_signature: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("in"),
            out_dir: PathBuf::from("out"),
            order_log: PathBuf::from("completed_orders.csv"),
            input_marker: "Overstock".to_string(),
            exclude_orders: Vec::new(),
            columns: SourceColumns::default(),
            email_greeting: "Hi Returns Team,".to_string(),
            email_signature: "Thank you,".to_string(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a JSON file
    ///
    /// Absent keys fall back to defaults via `#[serde(default)]`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
