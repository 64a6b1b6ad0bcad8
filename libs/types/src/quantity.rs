//! Whole-unit quantity type with lenient coercion
//!
//! Returns and allocations deal in whole units only; there are no
//! partial-unit quantities. Source exports frequently render integers as
//! floats ("5.0"), so coercion parses through rust_decimal and truncates
//! rather than letting any float arithmetic into the pipeline.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Non-negative whole-unit quantity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Create a quantity from a unit count
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// The zero quantity
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the unit count
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// Check whether this quantity is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Coerce a raw string field into a quantity
    ///
    /// Total: trims the input, parses through `Decimal`, truncates toward
    /// zero. Negative, fractional-only, and unparseable values all coerce
    /// to zero; callers filter zero quantities rather than erroring.
    pub fn coerce(raw: &str) -> Self {
        match Decimal::from_str(raw.trim()) {
            Ok(value) if value.is_sign_positive() => {
                Self(value.trunc().to_u32().unwrap_or(0))
            }
            _ => Self(0),
        }
    }

    /// Subtract, flooring at zero
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// The smaller of two quantities
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
