//! Demand aggregation
//!
//! Reduces raw overstock-return line items into one total requested
//! quantity per normalized item id. Ingestion is best-effort: rows that
//! normalize to nothing usable are dropped, never an error.

use std::collections::BTreeMap;
use types::ids::ItemId;
use types::quantity::Quantity;
use types::records::DemandLine;

/// One raw (item, quantity) pair as read from the return-request source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDemand {
    pub item: String,
    pub qty: String,
}

/// Aggregated demand: one entry per item, summed across request rows
///
/// Backed by a `BTreeMap` so iteration (and therefore allocation) walks
/// items in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemandSet {
    totals: BTreeMap<ItemId, Quantity>,
}

impl DemandSet {
    /// True when the item has requested quantity
    pub fn contains(&self, item: &ItemId) -> bool {
        self.totals.contains_key(item)
    }

    /// Total requested quantity for an item (zero when absent)
    pub fn requested(&self, item: &ItemId) -> Quantity {
        self.totals.get(item).copied().unwrap_or_else(Quantity::zero)
    }

    /// Iterate items and totals in item-id order
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, Quantity)> {
        self.totals.iter().map(|(item, qty)| (item, *qty))
    }

    /// Materialize as demand lines, in item-id order
    pub fn lines(&self) -> Vec<DemandLine> {
        self.totals
            .iter()
            .map(|(item, qty)| DemandLine {
                item: item.clone(),
                requested: *qty,
            })
            .collect()
    }

    /// Number of distinct items with demand
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// True when no usable demand was found
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Aggregate raw request rows into per-item totals
///
/// Item ids are normalized and quantities coerced; rows with an empty
/// normalized id or a non-positive quantity are dropped. Multiple rows
/// for the same item sum into one total.
pub fn aggregate(rows: impl IntoIterator<Item = RawDemand>) -> DemandSet {
    let mut totals: BTreeMap<ItemId, Quantity> = BTreeMap::new();
    let mut dropped = 0usize;

    for row in rows {
        let item = ItemId::normalize(&row.item);
        let qty = Quantity::coerce(&row.qty);
        if item.is_empty() || qty.is_zero() {
            dropped += 1;
            continue;
        }
        *totals.entry(item).or_insert_with(Quantity::zero) += qty;
    }

    if dropped > 0 {
        tracing::debug!(dropped, "dropped unusable return-request rows");
    }

    DemandSet { totals }
}
