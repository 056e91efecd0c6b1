//! Line item status codes for purchase order acknowledgements.
//!
//! Each acknowledged line carries a two digit status code describing what
//! the supplier did with it. Codes 1 to 29 are assigned; anything else is
//! reported as unknown rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened to an acknowledged line, in broad terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Shipped as ordered
    Accepted,
    /// Held until stock arrives
    Backordered,
    /// Will not be supplied
    Cancelled,
    /// Part of the quantity shipped
    PartialShip,
    /// Code not assigned
    Unknown,
}

/// A POA line item status code.
///
/// # Examples
///
/// ```
/// use bisac::{Outcome, PoaStatus};
///
/// let status = PoaStatus::new(7);
/// assert_eq!(status.outcome(), Outcome::Backordered);
/// assert_eq!(status.description(), "Backordered: Out of Stock");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoaStatus(u8);

impl PoaStatus {
    /// Wrap a status code.
    #[must_use]
    pub const fn new(code: u8) -> Self {
        PoaStatus(code)
    }

    /// The numeric code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Human readable description of the code, or `UNKNOWN`.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self.0 {
            1 => "Accepted: Title Shipped As Ordered",
            2 => "Accepted: Substitute Title Shipped As Ordered",
            3 | 4 => "Cancelled: Future Publication",
            5 => "Backordered: Future Publication",
            6 => "Cancelled: Out of Stock",
            7 => "Backordered: Out of Stock",
            8 | 28 => "Cancelled: Out of Print",
            9 => "Partial Ship: Cancel Rest",
            10 => "Partial Ship: Backorder Rest",
            11 => "Cancelled: HB Out of Print, PB Available",
            12 => "Cancelled: PB Out of Print, HB Available",
            13 => "Cancelled: Out of Print, Alt. Edition Available",
            14 => "Backordered: Substitute Title on BO",
            15 => "Cancelled: No Rights",
            16 => "Cancelled: Not our Publication",
            17 => "Accepted: Free Book",
            18 => "Cancelled: BO Expired",
            19 => "Cancelled: Subscription Only",
            20 | 21 => "Cancelled: Not Carried",
            22 => "Cancelled: Import Title",
            23 => "Cancelled: Not Available for Wholesale",
            24 => "Cancelled: Kits Not Available",
            25 => "Cancelled: Not Available",
            26 => "Cancelled: New Price From Publisher",
            27 => "Cancelled: ISBN Not Recognised",
            29 => "Backordered: At Customers Request",
            _ => "UNKNOWN",
        }
    }

    /// Broad outcome of the code.
    #[must_use]
    pub fn outcome(self) -> Outcome {
        match self.0 {
            1 | 2 | 17 => Outcome::Accepted,
            5 | 7 | 14 | 29 => Outcome::Backordered,
            9 | 10 => Outcome::PartialShip,
            3 | 4 | 6 | 8 | 11..=13 | 15 | 16 | 18..=28 => Outcome::Cancelled,
            _ => Outcome::Unknown,
        }
    }

    /// True when at least part of the line ships now.
    #[must_use]
    pub fn ships(self) -> bool {
        matches!(self.outcome(), Outcome::Accepted | Outcome::PartialShip)
    }
}

impl From<u8> for PoaStatus {
    fn from(code: u8) -> Self {
        PoaStatus(code)
    }
}

impl fmt::Display for PoaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} {}", self.0, self.description())
    }
}
