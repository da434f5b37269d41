//! Type-safe price representation using decimal arithmetic.
//!
//! Monetary amounts are carried as exact decimals end to end; rounding to
//! two places happens only when a price is formatted for display.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount in US dollars.
///
/// Arithmetic on prices stays exact; [`Price::display`] is the only place a
/// value is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal dollar amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Example
    ///
    /// ```
    /// use scoop_core::Price;
    ///
    /// let price = Price::from_cents(1299);
    /// assert_eq!(price.display(), "$12.99");
    /// ```
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, rounded to two decimal places (e.g., `$12.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1599);
        assert_eq!(price.amount(), Decimal::new(1599, 2));
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        // 1/3 of a dollar only rounds at display time
        let third = Price::new(Decimal::new(1, 0) / Decimal::new(3, 0));
        assert_eq!(third.display(), "$0.33");
        assert_ne!(third.amount(), Decimal::new(33, 2));
    }

    #[test]
    fn test_display_pads_zeroes() {
        assert_eq!(Price::from_cents(500).display(), "$5.00");
    }
}
