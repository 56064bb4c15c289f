//! Integer money and point types
//!
//! League accounting is whole-number only: acquisition costs are
//! non-negative integers, point deltas are signed integers. No fractional
//! or multi-currency arithmetic exists anywhere in the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Non-negative acquisition cost in budget units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cost(u32);

impl Cost {
    pub const ZERO: Cost = Cost(0);

    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Raw budget units.
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Subtraction clamped at zero, for "remaining budget" style displays.
    pub fn saturating_sub(&self, other: Cost) -> Cost {
        Cost(self.0.saturating_sub(other.0))
    }

    /// Addition clamped at the numeric ceiling.
    pub fn saturating_add(&self, other: Cost) -> Cost {
        Cost(self.0.saturating_add(other.0))
    }

    /// Checked addition; `None` on overflow.
    pub fn checked_add(&self, other: Cost) -> Option<Cost> {
        self.0.checked_add(other.0).map(Cost)
    }
}

impl Add for Cost {
    type Output = Cost;

    fn add(self, rhs: Cost) -> Cost {
        Cost(self.0 + rhs.0)
    }
}

impl AddAssign for Cost {
    fn add_assign(&mut self, rhs: Cost) {
        self.0 += rhs.0;
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Cost>>(iter: I) -> Cost {
        iter.fold(Cost::ZERO, |acc, c| acc + c)
    }
}

impl From<u32> for Cost {
    fn from(value: u32) -> Self {
        Cost(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signed point delta or point total.
///
/// Negative values are legitimate (malus actions), so totals can go below
/// zero and stay there.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(i64);

impl Points {
    pub const ZERO: Points = Points(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw point value.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Points {
        iter.fold(Points::ZERO, |acc, p| acc + p)
    }
}

impl From<i64> for Points {
    fn from(value: i64) -> Self {
        Points(value)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
