//! Type-safe price representation in minor currency units.
//!
//! The marketplace trades in Indonesian Rupiah, which has no fractional
//! unit in practice, so a price is a plain non-negative integer amount.
//! Arithmetic saturates instead of wrapping: cart totals are display
//! values and must never panic on absurd quantities.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// Separator between the currency symbol and the amount (no-break space).
const SYMBOL_SEPARATOR: char = '\u{a0}';

/// A price in minor currency units.
///
/// Serializes as a bare JSON number so persisted carts and backend payloads
/// keep the `price: 15999000` shape.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a new price from minor units.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units (saturating).
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Sum of two prices (saturating).
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

/// Formats as Rupiah, e.g. `Rp 15.999.000`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        write!(f, "Rp{SYMBOL_SEPARATOR}{grouped}")
    }
}
