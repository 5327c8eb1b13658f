//! Currency amounts held as whole cents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// An Australian-dollar amount in integer cents.
///
/// Arithmetic saturates at `u64::MAX` cents instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn from_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    pub const fn cents(self) -> u64 {
        self.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

/// Price times a whole count, e.g. certificates times the per-certificate price.
impl Mul<u64> for Money {
    type Output = Money;

    fn mul(self, count: u64) -> Money {
        Money(self.0.saturating_mul(count))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = (self.0 / 100).to_string();
        let cents = self.0 % 100;
        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, ch) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "${grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_thousands_separator() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(3_805).to_string(), "$38.05");
        assert_eq!(Money::from_dollars(1_400).to_string(), "$1,400.00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn multiplies_by_whole_counts_exactly() {
        let price = Money::from_cents(3_810);
        assert_eq!(price * 57, Money::from_cents(217_170));
        assert_eq!(price * 0, Money::ZERO);
    }

    #[test]
    fn arithmetic_saturates_instead_of_overflowing() {
        let max = Money::from_cents(u64::MAX);
        assert_eq!(Money::from_cents(3_800) * u64::MAX, max);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_dollars(u64::MAX), max);
    }

    #[test]
    fn sums_amounts() {
        let total: Money = [Money::from_dollars(1), Money::from_cents(50), Money::ZERO].into_iter().sum();
        assert_eq!(total, Money::from_cents(150));
    }
}
