//! Whole-unit prices and storefront currency formatting.
//!
//! Catalog prices are non-negative integers in the currency's standard unit
//! (roubles, no kopecks). A price of zero means "price on request": the item
//! is shown but cannot be added to the cart.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// Non-breaking space used by the `ru-RU` number format for digit grouping
/// and before the currency sign.
const NBSP: char = '\u{a0}';

/// A price in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// The zero price, also used as the "price on request" marker.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-unit amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the whole-unit amount.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Returns `true` when the catalog has no fixed price for the item.
    #[must_use]
    pub const fn is_on_request(&self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units. Saturates instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format for display in the given currency (e.g. `1 200 ₽`).
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(NBSP);
            }
            out.push(ch);
        }
        out.push(NBSP);
        out.push_str(currency.symbol());
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(CurrencyCode::default()))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| Self(acc.0.saturating_add(p.0)))
    }
}

/// ISO 4217 currency codes the storefront can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
}

impl CurrencyCode {
    /// Currency sign appended after the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::RUB => "₽",
        }
    }

    /// ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::RUB => "RUB",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new(0).to_string(), "0\u{a0}₽");
        assert_eq!(Price::new(500).to_string(), "500\u{a0}₽");
        assert_eq!(Price::new(1200).to_string(), "1\u{a0}200\u{a0}₽");
        assert_eq!(Price::new(1_234_567).to_string(), "1\u{a0}234\u{a0}567\u{a0}₽");
    }

    #[test]
    fn test_price_on_request() {
        assert!(Price::ZERO.is_on_request());
        assert!(!Price::new(1).is_on_request());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(500).times(2), Price::new(1200).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(2200));
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Price::new(u64::MAX).times(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_deserializes_from_integer() {
        let price: Price = serde_json::from_str("1990").unwrap();
        assert_eq!(price.amount(), 1990);
    }
}
