//! Consumption reconciliation
//!
//! The persisted ledger is an event log of every allocation ever made.
//! Reconciliation is a pure fold over that log into cumulative usage per
//! (order, item), recomputed fresh each run, followed by a deduction
//! join against the supply pool. Without this step a re-run would hand
//! out inventory that already shipped.

use crate::denylist::Denylist;
use std::collections::HashMap;
use types::ids::{ItemId, OrderId};
use types::quantity::Quantity;
use types::records::{ConsumptionRecord, SupplyRecord};

/// Cumulative consumed quantity per (order, item)
pub type UsedMap = HashMap<(OrderId, ItemId), Quantity>;

/// Fold ledger rows into cumulative consumed quantity per (order, item)
///
/// Rows with an empty order or item key contribute nothing, and
/// denylisted orders are ignored, mirroring the supply-pool filter.
pub fn fold_consumption(history: &[ConsumptionRecord], denylist: &Denylist) -> UsedMap {
    let mut used = UsedMap::new();
    for record in history {
        if record.order.is_empty() || record.item.is_empty() {
            continue;
        }
        if denylist.contains(&record.order) {
            continue;
        }
        *used
            .entry((record.order.clone(), record.item.clone()))
            .or_insert_with(Quantity::zero) += record.consumed;
    }
    used
}

/// Subtract prior consumption from the pool, dropping exhausted records
///
/// Deduction floors at zero; records with no consumption history pass
/// through unchanged.
pub fn apply_consumption(pool: Vec<SupplyRecord>, used: &UsedMap) -> Vec<SupplyRecord> {
    pool.into_iter()
        .filter_map(|mut record| {
            let key = (record.order.clone(), record.item.clone());
            if let Some(consumed) = used.get(&key) {
                record.available = record.available.saturating_sub(*consumed);
            }
            if record.available.is_zero() {
                None
            } else {
                Some(record)
            }
        })
        .collect()
}
