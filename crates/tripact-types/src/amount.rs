//! Scalar monetary amount
//!
//! Agreements denominate a single scalar amount in smallest units. There is
//! no currency dimension and no fractional representation; arithmetic is
//! checked everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount in smallest units
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(pub u64);

impl Amount {
    /// Create a new amount
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Create a zero amount
    pub fn zero() -> Self {
        Self(0)
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
