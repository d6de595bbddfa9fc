//! # Money Module
//!
//! Provides the `Money` type for menu prices and cart totals.
//!
//! Prices travel as integer cents (`priceCents` in the menu JSON), so a
//! cart total is an exact sum and never drifts the way `0.1 + 0.2` does.
//!
//! ## Usage
//! ```rust
//! use cafe_core::money::Money;
//!
//! let latte = Money::from_cents(450);
//! let two_lattes = latte * 2;
//! assert_eq!(two_lattes.to_string(), "$9.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use ts_rs::TS;

/// A monetary value in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Zero money.
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Returns the amount in cents.
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a line quantity. Saturates at the `i64`
    /// bounds.
    pub const fn multiply_quantity(&self, quantity: u32) -> Self {
        Money(self.0.saturating_mul(quantity as i64))
    }
}

/// Renders as `$d.cc`, with a leading `-` for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<u32> for Money {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        self.multiply_quantity(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(450).to_string(), "$4.50");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1234).to_string(), "-$12.34");
    }

    #[test]
    fn test_arithmetic() {
        let price = Money::from_cents(325);
        assert_eq!((price * 3).cents(), 975);
        assert_eq!((price + Money::from_cents(75)).cents(), 400);

        let mut total = Money::zero();
        total += price;
        assert_eq!(total, price);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 50].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 400);
        assert!(std::iter::empty::<Money>().sum::<Money>().is_zero());
    }

    #[test]
    fn test_arithmetic_saturates() {
        assert_eq!(Money::from_cents(i64::MAX) * 2, Money::from_cents(i64::MAX));
        let mut total = Money::from_cents(i64::MAX - 1);
        total += Money::from_cents(10);
        assert_eq!(total.cents(), i64::MAX);
    }
}
