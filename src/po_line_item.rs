//! Purchase order line items.
//!
//! A line item occupies up to three physical records that share a block of
//! three consecutive sequence numbers:
//!
//! - `40` — the item itself (ISBN, quantity, price)
//! - `41` — the title, written only when the item has one
//! - `42` — the author, written only when the item has one
//!
//! # Record `40` layout
//!
//! | Offset | Length | Field                                  |
//! |--------|--------|----------------------------------------|
//! | 0      | 2      | `40`                                   |
//! | 2      | 5      | sequence number                        |
//! | 7      | 13     | PO number (written from offset 8)      |
//! | 20     | 1      | `Y`                                    |
//! | 21     | 10     | line item number                       |
//! | 31     | 10     | ISBN-10                                |
//! | 41     | 5      | quantity                               |
//! | 46     | 1      | catalogue code                         |
//! | 47     | 6      | price, two implied decimals            |
//! | 53     | 22     | zero filler                            |
//! | 80     | 13     | ISBN-13 (non-standard extension)       |

use crate::error::{BisacError, Result};
use crate::field::{
    read_field, read_number, read_required_number, read_rest, FixedLine, Justify, MAX_QTY,
};
use crate::isbn;
use crate::price::Price;
use crate::record_type::{PoRecordType, RecordKind};
use crate::recovery::RecoveryMode;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Width of a PO record without the ISBN-13 extension.
pub const PO_RECORD_WIDTH: usize = 80;

/// Offset of the text carried by `41` and `42` continuation records.
const CONTINUATION_TEXT_OFFSET: usize = 21;
const CONTINUATION_TEXT_WIDTH: usize = 30;

/// The physical records of one line item, at most three.
pub type LineItemRecords = SmallVec<[String; 3]>;

/// One ordered title on a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoLineItem {
    /// Sequence number of the `40` record
    pub sequence_number: u32,
    /// Purchase order number this item belongs to
    pub po_number: String,
    /// Line item number within the order
    pub line_item_number: String,
    isbn: Option<String>,
    /// Ordered quantity. Values above [`MAX_QTY`] are written as `MAX_QTY`.
    pub qty: u32,
    /// Catalogue code
    pub catalogue_code: String,
    /// Price
    pub price: Price,
    /// Title, carried in a `41` record
    pub title: String,
    /// Author, carried in a `42` record
    pub author: String,
}

impl PoLineItem {
    /// Create an empty line item.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a `40` record.
    ///
    /// # Errors
    ///
    /// Returns [`BisacError::InvalidArgument`] if the line is not a `40`
    /// record and [`BisacError::InvalidFile`] if the sequence number is not
    /// numeric.
    ///
    /// # Examples
    ///
    /// ```
    /// use bisac::PoLineItem;
    ///
    /// let line = "4000003 14976       Y000000000102978513220000100000000000000000000550000000";
    /// let item = PoLineItem::from_line(line)?;
    ///
    /// assert_eq!(item.sequence_number, 3);
    /// assert_eq!(item.isbn(), Some("9780297851325"));
    /// assert_eq!(item.qty, 1);
    /// # Ok::<(), bisac::BisacError>(())
    /// ```
    pub fn from_line(line: &str) -> Result<Self> {
        Self::decode(line, RecoveryMode::Strict)
    }

    /// Decode a `40` record, substituting zero for an unreadable sequence
    /// number in lenient mode.
    ///
    /// # Errors
    ///
    /// See [`PoLineItem::from_line`].
    pub fn decode(line: &str, mode: RecoveryMode) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if PoRecordType::classify(line) != Some(PoRecordType::LineItem) {
            return Err(BisacError::InvalidArgument(
                "PO line items must start with '40'".to_string(),
            ));
        }

        let sequence_number = mode.or_default(
            read_required_number(line, 2, 5, "sequence number"),
            "PO line item",
        )?;

        Ok(PoLineItem {
            sequence_number,
            po_number: read_field(line, 7, 13).to_string(),
            line_item_number: read_field(line, 21, 10).to_string(),
            isbn: isbn::preferred(read_field(line, 80, 13), read_field(line, 31, 10)),
            qty: read_number(line, 41, 5),
            catalogue_code: read_field(line, 46, 1).to_string(),
            price: Price::from_cents(read_number(line, 47, 6)),
            title: String::new(),
            author: String::new(),
        })
    }

    /// Text carried by a `41` or `42` continuation record.
    #[must_use]
    pub fn continuation_text(line: &str) -> &str {
        read_rest(line, CONTINUATION_TEXT_OFFSET)
    }

    /// The ISBN, as 13 digits whenever the source value could be converted.
    #[must_use]
    pub fn isbn(&self) -> Option<&str> {
        self.isbn.as_deref()
    }

    /// Set the ISBN. A valid ISBN-10 is stored as its ISBN-13; other values
    /// are kept as given and a blank value clears the ISBN.
    pub fn set_isbn(&mut self, value: &str) {
        self.isbn = isbn::canonical(value);
    }

    /// The ISBN-10 form, when the ISBN has one.
    #[must_use]
    pub fn isbn10(&self) -> Option<String> {
        self.isbn.as_deref().and_then(isbn::to_isbn10)
    }

    /// True when the ISBN is a valid ISBN-13.
    #[must_use]
    pub fn has_valid_isbn(&self) -> bool {
        self.isbn.as_deref().is_some_and(isbn::is_valid_isbn13)
    }

    /// The quantity as written to the `40` record.
    #[must_use]
    pub fn written_qty(&self) -> u32 {
        self.qty.min(MAX_QTY)
    }

    /// Render the item's records using its own sequence number.
    #[must_use]
    pub fn to_lines(&self) -> LineItemRecords {
        self.render(self.sequence_number)
    }

    /// Render the item's records starting at `sequence`.
    ///
    /// The `41` and `42` records take `sequence + 1` and `sequence + 2` even
    /// when the title record is omitted.
    #[must_use]
    pub fn render(&self, sequence: u32) -> LineItemRecords {
        let mut records = LineItemRecords::new();
        if self.qty > MAX_QTY {
            tracing::warn!(qty = self.qty, "PO quantity exceeds its field; writing {MAX_QTY}");
        }

        let mut line = FixedLine::new(PO_RECORD_WIDTH);
        line.literal(0, PoRecordType::LineItem.marker())
            .number(2, 5, sequence)
            .text(8, 11, &self.po_number)
            .character(20, 'Y')
            .number(21, 10, &self.line_item_number)
            .text(31, 10, &isbn::standard_field(self.isbn()))
            .number(41, 5, self.written_qty())
            .text(46, 1, &self.catalogue_code)
            .number(47, 6, self.price.cents())
            .put(53, 22, "", Justify::Right, '0');
        let extension = isbn::extension_field(self.isbn());
        if !extension.is_empty() {
            line.text(80, 13, extension);
        }
        records.push(line.finish());

        for (offset, kind, text) in [
            (1, PoRecordType::LineItemTitle, &self.title),
            (2, PoRecordType::LineItemAuthor, &self.author),
        ] {
            if text.is_empty() {
                continue;
            }
            let mut line = FixedLine::new(PO_RECORD_WIDTH);
            line.literal(0, kind.marker())
                .number(2, 5, sequence + offset)
                .text(8, 11, &self.po_number)
                .text(CONTINUATION_TEXT_OFFSET, CONTINUATION_TEXT_WIDTH, text);
            records.push(line.finish());
        }

        records
    }
}
