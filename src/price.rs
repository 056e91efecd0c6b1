//! Monetary amounts as carried in BISAC records.
//!
//! BISAC writes prices as zero-filled digit runs with two implied decimal
//! places (`002995` is 29.95). [`Price`] keeps the amount as integer cents so
//! that decoding and re-encoding a record never changes its digits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount in the smallest currency unit (cents).
///
/// # Examples
///
/// ```
/// use bisac::Price;
///
/// let price = Price::from_major_minor(29, 95);
/// assert_eq!(price.cents(), 2995);
/// assert_eq!(price.to_string(), "29.95");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A price of zero.
    pub const ZERO: Price = Price(0);

    /// Create a price from cents.
    #[inline]
    #[must_use]
    pub const fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    /// Create a price from whole units and cents.
    #[inline]
    #[must_use]
    pub const fn from_major_minor(major: u64, minor: u64) -> Self {
        Price(major * 100 + minor)
    }

    /// The amount in cents.
    #[inline]
    #[must_use]
    pub const fn cents(self) -> u64 {
        self.0
    }

    /// True for a zero amount.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl From<u64> for Price {
    fn from(cents: u64) -> Self {
        Price(cents)
    }
}
