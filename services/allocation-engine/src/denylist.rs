//! Order exclusion list
//!
//! Denylisted orders never contribute supply and never count toward
//! prior consumption. The same filter applies in both places; excluding
//! an order only from one side would skew the availability arithmetic.

use std::collections::HashSet;
use types::ids::OrderId;

/// Configured set of excluded order identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denylist {
    orders: HashSet<OrderId>,
}

impl Denylist {
    /// Build a denylist from raw identifiers
    ///
    /// Entries normalize like any other order id, so `108934`,
    /// `[108934]`, and `108934.0` all denote the same exclusion.
    pub fn from_raw<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let orders = raw
            .into_iter()
            .map(|value| OrderId::normalize(value.as_ref()))
            .filter(|order| !order.is_empty())
            .collect();
        Self { orders }
    }

    /// True when the order is excluded
    pub fn contains(&self, order: &OrderId) -> bool {
        self.orders.contains(order)
    }

    /// Number of excluded orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// True when nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
