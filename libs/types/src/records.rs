//! Record types flowing through the reconciliation pipeline
//!
//! Demand and supply records are recomputed fresh every run from the
//! source exports; consumption records persist in the append-only ledger
//! and are read back in full on every run.

use crate::ids::{ItemId, OrderId};
use crate::quantity::Quantity;
use crate::timestamp::OrderTimestamp;
use serde::{Deserialize, Serialize};

/// Aggregated return demand for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandLine {
    pub item: ItemId,
    /// Total quantity requested for return across all request rows
    pub requested: Quantity,
}

/// One order's contribution of one item to the supply pool
///
/// `available` starts at the quantity originally ordered and only ever
/// decreases: first by prior-run consumption, then by allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyRecord {
    pub item: ItemId,
    pub order: OrderId,
    pub ordered_at: OrderTimestamp,
    pub available: Quantity,
}

/// One parsed row of the persisted consumption ledger
///
/// Only meaningful in aggregate: reconciliation sums consumed quantity
/// per (order, item) and never inspects individual rows beyond that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub order: OrderId,
    pub item: ItemId,
    pub consumed: Quantity,
}

/// One allocation made by the current run
///
/// The run's batch of these rows is exactly what gets appended to the
/// consumption ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub order: OrderId,
    pub ordered_at: OrderTimestamp,
    pub item: ItemId,
    pub allocated: Quantity,
}

/// Requested quantity no available supply could satisfy this run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfulfilledRecord {
    pub item: ItemId,
    pub remaining: Quantity,
}
