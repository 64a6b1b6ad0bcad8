//! Order timestamp canonicalization
//!
//! Allocation walks supply oldest-order-first, so every order timestamp
//! is reduced to one canonical, lexicographically sortable string form.
//! Parse failures yield an *unknown* timestamp; unknown sorts after every
//! known timestamp, so undated supply never jumps the queue.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Canonical storage and sort format
const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date-time formats accepted from source exports
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%y %H:%M",
];

/// Date-only formats accepted from source exports; midnight is assumed
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// An order's placement time in canonical `%Y-%m-%d %H:%M:%S` form
///
/// The canonical string sorts lexicographically in chronological order.
/// An unparseable or missing source value becomes [`OrderTimestamp::unknown`],
/// which compares greater than every known timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderTimestamp(String);

impl OrderTimestamp {
    /// Parse a raw date-time field, accepting several export formats
    ///
    /// Total: anything unrecognized becomes the unknown timestamp.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::unknown();
        }
        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Self(dt.format(CANONICAL_FORMAT).to_string());
            }
        }
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                    return Self(dt.format(CANONICAL_FORMAT).to_string());
                }
            }
        }
        Self::unknown()
    }

    /// The unknown timestamp (empty canonical form)
    pub fn unknown() -> Self {
        Self(String::new())
    }

    /// True when the source value was missing or unparseable
    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the canonical string (empty when unknown)
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for OrderTimestamp {
    /// Chronological order with unknown timestamps last
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_unknown(), other.is_unknown()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for OrderTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OrderTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
