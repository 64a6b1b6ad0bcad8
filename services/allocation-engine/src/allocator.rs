//! FIFO allocation
//!
//! Walks each requested item's supply records oldest-order-first and
//! greedily satisfies demand, recording partial fulfillment where supply
//! runs out. Pure greedy with no backtracking: units taken from an order
//! are never returned, even if a later item could have used them better.

use crate::demand::DemandSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::ids::{ItemId, OrderId};
use types::quantity::Quantity;
use types::records::{AllocationRow, SupplyRecord, UnfulfilledRecord};

/// Result of one allocation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Allocations made this run, in allocation order; this batch is
    /// exactly what gets appended to the consumption ledger
    pub allocations: Vec<AllocationRow>,
    /// Demand no available supply could satisfy
    pub unfulfilled: Vec<UnfulfilledRecord>,
    /// The working pool after allocation, exhausted records included
    pub remaining_pool: Vec<SupplyRecord>,
}

/// Grouped batch row for downstream reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummaryRow {
    pub order: OrderId,
    pub item: ItemId,
    pub total: Quantity,
}

/// Allocate demand against the supply pool, FIFO by order date
///
/// Takes exclusive ownership of the pool as its mutable working copy.
/// Records are sorted by (item, order timestamp, order id); unknown
/// timestamps sort last, so undated supply is only touched once every
/// dated order for that item is exhausted. Items are processed in
/// item-id order, and each record belongs to exactly one item's
/// sub-pool, so there is no cross-item contention for units.
pub fn allocate(demand: &DemandSet, mut pool: Vec<SupplyRecord>) -> AllocationOutcome {
    pool.sort_by(|a, b| {
        a.item
            .cmp(&b.item)
            .then_with(|| a.ordered_at.cmp(&b.ordered_at))
            .then_with(|| a.order.cmp(&b.order))
    });

    let mut allocations = Vec::new();
    let mut unfulfilled = Vec::new();

    for (item, requested) in demand.iter() {
        let mut need = requested;
        for record in pool.iter_mut().filter(|r| &r.item == item) {
            if need.is_zero() {
                break;
            }
            let take = need.min(record.available);
            if !take.is_zero() {
                allocations.push(AllocationRow {
                    order: record.order.clone(),
                    ordered_at: record.ordered_at.clone(),
                    item: record.item.clone(),
                    allocated: take,
                });
                record.available = record.available.saturating_sub(take);
                need = need.saturating_sub(take);
            }
        }
        if !need.is_zero() {
            unfulfilled.push(UnfulfilledRecord {
                item: item.clone(),
                remaining: need,
            });
        }
    }

    tracing::debug!(
        allocations = allocations.len(),
        unfulfilled = unfulfilled.len(),
        "allocation pass complete"
    );

    AllocationOutcome {
        allocations,
        unfulfilled,
        remaining_pool: pool,
    }
}

/// Collapse an allocation batch by (order, item), summing quantities
///
/// Output is sorted by order then item for stable report rendering.
pub fn summarize(batch: &[AllocationRow]) -> Vec<BatchSummaryRow> {
    let mut totals: BTreeMap<(OrderId, ItemId), Quantity> = BTreeMap::new();
    for row in batch {
        *totals
            .entry((row.order.clone(), row.item.clone()))
            .or_insert_with(Quantity::zero) += row.allocated;
    }
    totals
        .into_iter()
        .map(|((order, item), total)| BatchSummaryRow { order, item, total })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demand::{aggregate, RawDemand};
    use crate::denylist::Denylist;
    use crate::reconcile::{apply_consumption, fold_consumption};
    use proptest::prelude::*;
    use types::records::ConsumptionRecord;
    use types::timestamp::OrderTimestamp;

    fn demand_for(items: &[(&str, &str)]) -> DemandSet {
        aggregate(items.iter().map(|(item, qty)| RawDemand {
            item: item.to_string(),
            qty: qty.to_string(),
        }))
    }

    fn supply(order: &str, item: &str, ts: &str, qty: u32) -> SupplyRecord {
        SupplyRecord {
            item: ItemId::normalize(item),
            order: OrderId::normalize(order),
            ordered_at: OrderTimestamp::parse_lenient(ts),
            available: Quantity::new(qty),
        }
    }

    #[test]
    fn test_fifo_split_across_orders() {
        // 15 requested against 10 on the older order and 10 on the newer:
        // the older order is exhausted first, the newer covers the rest.
        let demand = demand_for(&[("0001112223334", "15")]);
        let pool = vec![
            supply("101", "0001112223334", "2024-01-05", 10),
            supply("100", "0001112223334", "2024-01-01", 10),
        ];

        let outcome = allocate(&demand, pool);

        assert_eq!(outcome.allocations.len(), 2);
        assert_eq!(outcome.allocations[0].order.as_str(), "[100]");
        assert_eq!(outcome.allocations[0].allocated, Quantity::new(10));
        assert_eq!(outcome.allocations[1].order.as_str(), "[101]");
        assert_eq!(outcome.allocations[1].allocated, Quantity::new(5));
        assert!(outcome.unfulfilled.is_empty());

        let newer = outcome
            .remaining_pool
            .iter()
            .find(|r| r.order.as_str() == "[101]")
            .unwrap();
        assert_eq!(newer.available, Quantity::new(5));
    }

    #[test]
    fn test_exhausted_history_shifts_to_newer_order() {
        // Prior runs already consumed all of [100]; allocation starts at
        // [101] and the remainder goes unfulfilled.
        let demand = demand_for(&[("0001112223334", "15")]);
        let pool = vec![
            supply("100", "0001112223334", "2024-01-01", 10),
            supply("101", "0001112223334", "2024-01-05", 10),
        ];
        let history = vec![ConsumptionRecord {
            order: OrderId::normalize("100"),
            item: ItemId::normalize("0001112223334"),
            consumed: Quantity::new(10),
        }];

        let used = fold_consumption(&history, &Denylist::default());
        let pool = apply_consumption(pool, &used);
        let outcome = allocate(&demand, pool);

        assert_eq!(outcome.allocations.len(), 1);
        assert_eq!(outcome.allocations[0].order.as_str(), "[101]");
        assert_eq!(outcome.allocations[0].allocated, Quantity::new(10));
        assert_eq!(outcome.unfulfilled.len(), 1);
        assert_eq!(outcome.unfulfilled[0].remaining, Quantity::new(5));
    }

    #[test]
    fn test_tie_break_on_order_id() {
        let demand = demand_for(&[("111", "1")]);
        let pool = vec![
            supply("200", "111", "2024-01-01", 5),
            supply("100", "111", "2024-01-01", 5),
        ];
        let outcome = allocate(&demand, pool);
        assert_eq!(outcome.allocations[0].order.as_str(), "[100]");
    }

    #[test]
    fn test_unknown_timestamp_allocated_last() {
        let demand = demand_for(&[("111", "6")]);
        let pool = vec![
            supply("300", "111", "", 5),
            supply("100", "111", "2024-06-01", 5),
        ];
        let outcome = allocate(&demand, pool);
        assert_eq!(outcome.allocations[0].order.as_str(), "[100]");
        assert_eq!(outcome.allocations[0].allocated, Quantity::new(5));
        assert_eq!(outcome.allocations[1].order.as_str(), "[300]");
        assert_eq!(outcome.allocations[1].allocated, Quantity::new(1));
    }

    #[test]
    fn test_item_with_no_supply_fully_unfulfilled() {
        let demand = demand_for(&[("111", "4")]);
        let outcome = allocate(&demand, Vec::new());
        assert!(outcome.allocations.is_empty());
        assert_eq!(outcome.unfulfilled.len(), 1);
        assert_eq!(outcome.unfulfilled[0].remaining, Quantity::new(4));
    }

    #[test]
    fn test_items_allocate_independently() {
        let demand = demand_for(&[("111", "3"), ("222", "4")]);
        let pool = vec![supply("100", "111", "2024-01-01", 10), supply("100", "222", "2024-01-01", 2)];
        let outcome = allocate(&demand, pool);

        assert_eq!(outcome.allocations.len(), 2);
        assert_eq!(outcome.allocations[0].item.as_str(), "111");
        assert_eq!(outcome.allocations[0].allocated, Quantity::new(3));
        assert_eq!(outcome.allocations[1].item.as_str(), "222");
        assert_eq!(outcome.allocations[1].allocated, Quantity::new(2));
        assert_eq!(outcome.unfulfilled.len(), 1);
        assert_eq!(outcome.unfulfilled[0].item.as_str(), "222");
    }

    #[test]
    fn test_summarize_collapses_duplicate_keys() {
        let rows = vec![
            AllocationRow {
                order: OrderId::normalize("100"),
                ordered_at: OrderTimestamp::unknown(),
                item: ItemId::normalize("111"),
                allocated: Quantity::new(2),
            },
            AllocationRow {
                order: OrderId::normalize("100"),
                ordered_at: OrderTimestamp::unknown(),
                item: ItemId::normalize("111"),
                allocated: Quantity::new(3),
            },
        ];
        let summary = summarize(&rows);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].total, Quantity::new(5));
    }

    // Strategy: a small pool of supply records over a handful of items
    // and orders, with a demand total per item.
    fn arb_pool() -> impl Strategy<Value = Vec<SupplyRecord>> {
        proptest::collection::vec(
            (0u8..4, 0u8..5, 0u32..20, 0u32..4).prop_map(|(item, order, qty, day)| SupplyRecord {
                item: ItemId::normalize(&format!("11{item}")),
                order: OrderId::normalize(&format!("{order}")),
                ordered_at: OrderTimestamp::parse_lenient(&format!("2024-01-0{}", day + 1)),
                available: Quantity::new(qty),
            }),
            0..12,
        )
    }

    fn arb_demand() -> impl Strategy<Value = DemandSet> {
        proptest::collection::vec((0u8..4, 1u32..40), 0..6).prop_map(|entries| {
            aggregate(entries.into_iter().map(|(item, qty)| RawDemand {
                item: format!("11{item}"),
                qty: qty.to_string(),
            }))
        })
    }

    proptest! {
        #[test]
        fn prop_conservation_per_item(demand in arb_demand(), pool in arb_pool()) {
            let outcome = allocate(&demand, pool);
            for (item, requested) in demand.iter() {
                let allocated: Quantity = outcome
                    .allocations
                    .iter()
                    .filter(|row| &row.item == item)
                    .map(|row| row.allocated)
                    .sum();
                let remaining: Quantity = outcome
                    .unfulfilled
                    .iter()
                    .filter(|record| &record.item == item)
                    .map(|record| record.remaining)
                    .sum();
                prop_assert_eq!(allocated + remaining, requested);
            }
        }

        #[test]
        fn prop_no_over_allocation_within_run(demand in arb_demand(), pool in arb_pool()) {
            let original: Vec<SupplyRecord> = pool.clone();
            let outcome = allocate(&demand, pool);
            // Per (order, item), allocated quantity never exceeds what the
            // pool offered.
            for summary in summarize(&outcome.allocations) {
                let offered: Quantity = original
                    .iter()
                    .filter(|r| r.order == summary.order && r.item == summary.item)
                    .map(|r| r.available)
                    .sum();
                prop_assert!(summary.total <= offered);
            }
        }

        #[test]
        fn prop_fifo_earlier_exhausted_first(demand in arb_demand(), pool in arb_pool()) {
            let outcome = allocate(&demand, pool);
            // If a record with a known timestamp still has units left, no
            // allocation for that item may come from a strictly later
            // (or unknown) timestamp.
            for leftover in outcome
                .remaining_pool
                .iter()
                .filter(|r| !r.available.is_zero() && !r.ordered_at.is_unknown())
            {
                for row in outcome.allocations.iter().filter(|row| row.item == leftover.item) {
                    prop_assert!(
                        row.ordered_at <= leftover.ordered_at,
                        "allocated from {:?} while {:?} still had units",
                        row.ordered_at,
                        leftover.ordered_at
                    );
                }
            }
        }
    }
}
