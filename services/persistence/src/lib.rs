//! Consumption Ledger Persistence
//!
//! Provides append-only storage for allocation history. The ledger is
//! the source of truth for which (order, item) quantities past runs have
//! already consumed; it is read in full at the start of every run and
//! appended to at the end, never rewritten.

pub mod ledger;

pub use ledger::{append_batch, read_history, LedgerError};
