//! Allocation Engine
//!
//! Reconciles overstock-return demand against the historical order pool
//! using first-in-first-out allocation by order date.
//!
//! **Key Invariants:**
//! - FIFO by order timestamp strictly enforced (oldest supply first)
//! - Conservation of quantity (allocated + unfulfilled == requested)
//! - No unit is allocated twice across runs (prior consumption deducted)
//! - Deterministic (same inputs → same outputs, sorted iteration)

pub mod allocator;
pub mod demand;
pub mod denylist;
pub mod pool;
pub mod reconcile;

pub use allocator::{allocate, summarize, AllocationOutcome, BatchSummaryRow};
pub use demand::{aggregate, DemandSet, RawDemand};
pub use denylist::Denylist;
pub use pool::{build_pool, OrderLogRow};
pub use reconcile::{apply_consumption, fold_consumption, UsedMap};
