//! Identifier types for reconciliation entities
//!
//! Item and order identifiers arrive as dirty strings from warehouse
//! exports. Both are stored in a canonical form so the same logical
//! entity always compares equal regardless of source formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Normalized item identifier (barcode / UPC)
///
/// Canonical form is digits-only. Normalization is total: input with no
/// digits yields an empty id, which upstream filtering discards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Normalize a raw item identifier by stripping every non-digit character
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    /// Get the canonical digits-only string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when normalization found no digits
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized order identifier
///
/// Canonical form is a single pair of brackets around the bare number,
/// e.g. `[12345]`. Raw values `12345`, `[12345]`, and `12345.0` all
/// normalize to `[12345]`.
///
/// Normalization unwraps any existing bracket layer before re-wrapping,
/// so it is idempotent. Blindly adding brackets is not: it would turn
/// `[X]` into `[[X]]` and split the same order across two keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Normalize a raw order identifier into canonical bracketed form
    ///
    /// Empty (after trimming) input stays empty. Otherwise one leading `[`
    /// and one trailing `]` are stripped, a trailing decimal remainder is
    /// cut (order logs sometimes render integer ids as floats), and the
    /// result is wrapped in a single pair of brackets.
    pub fn normalize(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return Self(String::new());
        }
        let s = s.strip_prefix('[').unwrap_or(s);
        let s = s.strip_suffix(']').unwrap_or(s);
        let s = s.split('.').next().unwrap_or("").trim();
        Self(format!("[{s}]"))
    }

    /// Get the canonical bracketed string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The bare identifier without the canonical brackets
    ///
    /// Wholesaler-facing exports want plain order numbers.
    pub fn unbracketed(&self) -> &str {
        let s = self.0.strip_prefix('[').unwrap_or(&self.0);
        s.strip_suffix(']').unwrap_or(s)
    }

    /// True when the raw input was empty or whitespace
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for one reconciliation run
///
/// Uses UUID v7 for time-based sorting, so ledger rows stamped with a
/// RunId can be ordered chronologically by batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new RunId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
