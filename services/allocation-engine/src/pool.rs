//! Supply pool construction
//!
//! Expands the completed-order log (one row per order, with a multi-line
//! embedded item list) into a flat pool of per-(item, order) supply
//! records, restricted to items that were actually requested.

use crate::demand::DemandSet;
use crate::denylist::Denylist;
use types::ids::{ItemId, OrderId};
use types::quantity::Quantity;
use types::records::SupplyRecord;
use types::timestamp::OrderTimestamp;

/// One raw order-log row as read from the export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderLogRow {
    /// Primary order identifier
    pub order_id: String,
    /// Secondary confirmation identifier; wins over `order_id` whenever
    /// it is non-blank after trimming
    pub confirmation_id: String,
    /// Raw order placement date-time
    pub ordered_at: String,
    /// Embedded multi-line `item, quantity[, extras]` list
    pub items_cell: String,
}

impl OrderLogRow {
    /// The identifier this row is keyed on: confirmation id when
    /// non-blank, else the primary order id
    fn effective_order_id(&self) -> &str {
        let confirmation = self.confirmation_id.trim();
        if confirmation.is_empty() {
            &self.order_id
        } else {
            confirmation
        }
    }
}

/// Parse one line of the embedded items cell: `item, quantity[, extras]`
///
/// Fields are trimmed and stripped of surrounding double quotes; extra
/// fields beyond the first two are ignored. Returns `None` for lines
/// with fewer than two fields, an item that normalizes to nothing, or a
/// quantity that coerces to zero.
fn parse_item_line(line: &str) -> Option<(ItemId, Quantity)> {
    let mut fields = line.split(',').map(|field| field.trim().trim_matches('"'));
    let item = ItemId::normalize(fields.next()?);
    let qty = Quantity::coerce(fields.next()?);
    if item.is_empty() || qty.is_zero() {
        return None;
    }
    Some((item, qty))
}

/// Build the supply pool from order-log rows
///
/// Rows without a usable order id or items cell contribute nothing.
/// Only items present in `demand` enter the pool, and denylisted orders
/// are excluded entirely.
pub fn build_pool(
    rows: impl IntoIterator<Item = OrderLogRow>,
    demand: &DemandSet,
    denylist: &Denylist,
) -> Vec<SupplyRecord> {
    let mut pool = Vec::new();
    let mut skipped_rows = 0usize;

    for row in rows {
        let order = OrderId::normalize(row.effective_order_id());
        if order.is_empty() || row.items_cell.is_empty() {
            skipped_rows += 1;
            continue;
        }
        if denylist.contains(&order) {
            continue;
        }
        let ordered_at = OrderTimestamp::parse_lenient(&row.ordered_at);
        for line in row.items_cell.split(['\r', '\n']) {
            if let Some((item, qty)) = parse_item_line(line) {
                if demand.contains(&item) {
                    pool.push(SupplyRecord {
                        item,
                        order: order.clone(),
                        ordered_at: ordered_at.clone(),
                        available: qty,
                    });
                }
            }
        }
    }

    if skipped_rows > 0 {
        tracing::debug!(skipped_rows, "skipped order-log rows without id or items");
    }

    pool
}
