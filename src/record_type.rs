//! Record-type markers for each BISAC message kind.
//!
//! Every BISAC line starts with a marker identifying its record type: two
//! digits for purchase orders and acknowledgements, a ten character banner for
//! the title file header and trailer. Each message kind has a closed set of
//! record types, modelled here as one enum per kind.
//!
//! | Kind  | Header       | Detail           | Control | Trailer      |
//! |-------|--------------|------------------|---------|--------------|
//! | Title | `**HEADER**` | product lines    |         | `**TRAILER*` |
//! | PO    | `00`, `10`   | `40`, `41`, `42` | `50`    | `90`         |
//! | POA   | `02`, `11`   | `40`             | `59`    | `91`         |

use crate::field::read_raw;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Shared behaviour of the record-type enums.
pub trait RecordKind: Copy + Eq + Debug {
    /// Record type that must open a message.
    const HEADER: Self;

    /// Record type that closes a message.
    const FOOTER: Self;

    /// Identify the record type of a line, or `None` for blank lines and
    /// markers this message kind does not model.
    fn classify(line: &str) -> Option<Self>;

    /// The marker text written at the start of the record.
    fn marker(self) -> &'static str;

    /// True when `line` is the footer of a message.
    fn is_footer(line: &str) -> bool {
        Self::classify(line) == Some(Self::FOOTER)
    }

    /// True when `line` is the header of a message.
    fn is_header(line: &str) -> bool {
        Self::classify(line) == Some(Self::HEADER)
    }
}

/// Record types of a title (product metadata) file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TitleRecordType {
    /// `**HEADER**` file header
    Header,
    /// Any other non-blank line: one product
    Product,
    /// `**TRAILER**` file trailer
    Trailer,
}

/// Banner opening a title file.
pub const TITLE_HEADER_MARKER: &str = "**HEADER**";

/// Banner closing a title file. Writers emit `**TRAILER*` followed by the
/// date, readers also see `**TRAILER**`; both share this prefix.
pub const TITLE_TRAILER_MARKER: &str = "**TRAILER*";

impl RecordKind for TitleRecordType {
    const HEADER: Self = TitleRecordType::Header;
    const FOOTER: Self = TitleRecordType::Trailer;

    fn classify(line: &str) -> Option<Self> {
        if line.starts_with(TITLE_HEADER_MARKER) {
            Some(TitleRecordType::Header)
        } else if line.starts_with(TITLE_TRAILER_MARKER) {
            Some(TitleRecordType::Trailer)
        } else if line.trim().is_empty() {
            None
        } else {
            Some(TitleRecordType::Product)
        }
    }

    fn marker(self) -> &'static str {
        match self {
            TitleRecordType::Header => TITLE_HEADER_MARKER,
            TitleRecordType::Product => "",
            TitleRecordType::Trailer => TITLE_TRAILER_MARKER,
        }
    }
}

/// Record types of a purchase order file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoRecordType {
    /// `00` file header
    FileHeader,
    /// `10` purchase order header
    PurchaseOrder,
    /// `40` line item
    LineItem,
    /// `41` line item title continuation
    LineItemTitle,
    /// `42` line item author continuation
    LineItemAuthor,
    /// `50` purchase order control totals
    Control,
    /// `90` file trailer
    FileTrailer,
}

impl PoRecordType {
    /// Look up a two-digit record code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "00" => Some(PoRecordType::FileHeader),
            "10" => Some(PoRecordType::PurchaseOrder),
            "40" => Some(PoRecordType::LineItem),
            "41" => Some(PoRecordType::LineItemTitle),
            "42" => Some(PoRecordType::LineItemAuthor),
            "50" => Some(PoRecordType::Control),
            "90" => Some(PoRecordType::FileTrailer),
            _ => None,
        }
    }

    /// Tens group of the record code (`4` for `40`–`49`), used by the
    /// trailer's per-group record counts.
    #[must_use]
    pub fn group(self) -> usize {
        group_of(self.marker())
    }
}

impl RecordKind for PoRecordType {
    const HEADER: Self = PoRecordType::FileHeader;
    const FOOTER: Self = PoRecordType::FileTrailer;

    fn classify(line: &str) -> Option<Self> {
        Self::from_code(read_raw(line, 0, 2))
    }

    fn marker(self) -> &'static str {
        match self {
            PoRecordType::FileHeader => "00",
            PoRecordType::PurchaseOrder => "10",
            PoRecordType::LineItem => "40",
            PoRecordType::LineItemTitle => "41",
            PoRecordType::LineItemAuthor => "42",
            PoRecordType::Control => "50",
            PoRecordType::FileTrailer => "90",
        }
    }
}

/// Record types of a purchase order acknowledgement file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoaRecordType {
    /// `02` file header
    FileHeader,
    /// `11` acknowledgement header
    Acknowledgement,
    /// `40` line item
    LineItem,
    /// `59` acknowledgement control totals
    Control,
    /// `91` file trailer
    FileTrailer,
}

impl PoaRecordType {
    /// Look up a two-digit record code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "02" => Some(PoaRecordType::FileHeader),
            "11" => Some(PoaRecordType::Acknowledgement),
            "40" => Some(PoaRecordType::LineItem),
            "59" => Some(PoaRecordType::Control),
            "91" => Some(PoaRecordType::FileTrailer),
            _ => None,
        }
    }

    /// Tens group of the record code (`5` for `50`–`59`).
    #[must_use]
    pub fn group(self) -> usize {
        group_of(self.marker())
    }
}

impl RecordKind for PoaRecordType {
    const HEADER: Self = PoaRecordType::FileHeader;
    const FOOTER: Self = PoaRecordType::FileTrailer;

    fn classify(line: &str) -> Option<Self> {
        Self::from_code(read_raw(line, 0, 2))
    }

    fn marker(self) -> &'static str {
        match self {
            PoaRecordType::FileHeader => "02",
            PoaRecordType::Acknowledgement => "11",
            PoaRecordType::LineItem => "40",
            PoaRecordType::Control => "59",
            PoaRecordType::FileTrailer => "91",
        }
    }
}

fn group_of(code: &str) -> usize {
    code.chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .map_or(0, |d| d as usize)
}
