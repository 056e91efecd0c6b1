//! Purchase order acknowledgement line items.
//!
//! Each acknowledged line is a single `40` record of 80 characters, extended
//! to 93 when the 13-digit ISBN is present:
//!
//! | Offset | Length | Field                          |
//! |--------|--------|--------------------------------|
//! | 2      | 5      | sequence number                |
//! | 7      | 13     | supplier POA number            |
//! | 20     | 10     | line item number               |
//! | 30     | 10     | ISBN-10                        |
//! | 40     | 5      | order quantity                 |
//! | 45     | 8      | unit price, two implied decimals |
//! | 53     | 9      | nett price, two implied decimals |
//! | 62     | 1      | list/nett indicator            |
//! | 63     | 1      | special price flag             |
//! | 64     | 5      | discount                       |
//! | 69     | 5      | shippable quantity             |
//! | 74     | 2      | status code                    |
//! | 76     | 2      | warehouse status               |
//! | 80     | 13     | ISBN-13 (non-standard extension) |

use crate::error::{BisacError, Result};
use crate::field::{
    read_char, read_field, read_number, read_required_number, FixedLine, MAX_QTY,
};
use crate::isbn;
use crate::poa_status::{Outcome, PoaStatus};
use crate::price::Price;
use crate::record_type::{PoaRecordType, RecordKind};
use crate::recovery::RecoveryMode;
use serde::{Deserialize, Serialize};

/// Width of a POA record without the ISBN-13 extension.
pub const POA_RECORD_WIDTH: usize = 80;

/// One acknowledged line of a purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoaLineItem {
    /// Sequence number of the record
    pub sequence_number: u32,
    /// Supplier's acknowledgement number
    pub supplier_poa_number: String,
    /// Line item number from the purchase order
    pub line_item_number: String,
    isbn: Option<String>,
    /// Quantity ordered. Values above [`MAX_QTY`] are written as `MAX_QTY`.
    pub order_qty: u32,
    /// Unit (list) price
    pub unit_price: Price,
    /// Nett price
    pub nett_price: Price,
    /// Whether `nett_price` is a list or nett figure, as sent
    pub list_nett_indicator: char,
    /// Special price flag, as sent
    pub special_price: char,
    /// Discount
    pub discount: u32,
    /// Quantity that can ship, capped like `order_qty` on output
    pub shippable_qty: u32,
    /// What the supplier did with the line, absent when blank
    pub status: Option<PoaStatus>,
    /// Warehouse status, absent when blank
    pub warehouse_status: Option<u8>,
}

impl Default for PoaLineItem {
    fn default() -> Self {
        PoaLineItem {
            sequence_number: 0,
            supplier_poa_number: String::new(),
            line_item_number: String::new(),
            isbn: None,
            order_qty: 0,
            unit_price: Price::ZERO,
            nett_price: Price::ZERO,
            list_nett_indicator: ' ',
            special_price: ' ',
            discount: 0,
            shippable_qty: 0,
            status: None,
            warehouse_status: None,
        }
    }
}

impl PoaLineItem {
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
    /// use bisac::{Outcome, PoaLineItem};
    ///
    /// let line = "40000030000000019629000000000107112260670000100000000000000000  000000000101    ";
    /// let item = PoaLineItem::from_line(line)?;
    ///
    /// assert_eq!(item.isbn(), Some("9780711226067"));
    /// assert_eq!(item.shippable_qty, 1);
    /// assert_eq!(item.outcome(), Outcome::Accepted);
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
    /// See [`PoaLineItem::from_line`].
    pub fn decode(line: &str, mode: RecoveryMode) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if PoaRecordType::classify(line) != Some(PoaRecordType::LineItem) {
            return Err(BisacError::InvalidArgument(
                "POA line items must start with '40'".to_string(),
            ));
        }

        let sequence_number = mode.or_default(
            read_required_number(line, 2, 5, "sequence number"),
            "POA line item",
        )?;

        Ok(PoaLineItem {
            sequence_number,
            supplier_poa_number: read_field(line, 7, 13).to_string(),
            line_item_number: read_field(line, 20, 10).to_string(),
            isbn: isbn::preferred(read_field(line, 80, 13), read_field(line, 30, 10)),
            order_qty: read_number(line, 40, 5),
            unit_price: Price::from_cents(read_number(line, 45, 8)),
            nett_price: Price::from_cents(read_number(line, 53, 9)),
            list_nett_indicator: read_char(line, 62),
            special_price: read_char(line, 63),
            discount: read_number(line, 64, 5),
            shippable_qty: read_number(line, 69, 5),
            status: read_field(line, 74, 2).parse().ok().map(PoaStatus::new),
            warehouse_status: read_field(line, 76, 2).parse().ok(),
        })
    }

    /// Outcome of the line, [`Outcome::Unknown`] when no status was sent.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.status.map_or(Outcome::Unknown, PoaStatus::outcome)
    }

    /// Ordered and shippable quantities as written to the record.
    #[must_use]
    pub fn written_qty(&self) -> (u32, u32) {
        (self.order_qty.min(MAX_QTY), self.shippable_qty.min(MAX_QTY))
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

    /// Render the record using the item's own sequence number.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.render(self.sequence_number)
    }

    /// Render the record with `sequence` as its sequence number.
    #[must_use]
    pub fn render(&self, sequence: u32) -> String {
        if self.order_qty > MAX_QTY || self.shippable_qty > MAX_QTY {
            tracing::warn!(
                order_qty = self.order_qty,
                shippable_qty = self.shippable_qty,
                "POA quantity exceeds its field; writing {MAX_QTY}"
            );
        }
        let (order_qty, shippable_qty) = self.written_qty();
        let mut line = FixedLine::new(POA_RECORD_WIDTH);
        line.literal(0, PoaRecordType::LineItem.marker())
            .number(2, 5, sequence)
            .text(7, 13, &self.supplier_poa_number)
            .number(20, 10, &self.line_item_number)
            .text(30, 10, &isbn::standard_field(self.isbn()))
            .number(40, 5, order_qty)
            .number(45, 8, self.unit_price.cents())
            .number(53, 9, self.nett_price.cents())
            .character(62, self.list_nett_indicator)
            .character(63, self.special_price)
            .number(64, 5, self.discount)
            .number(69, 5, shippable_qty);
        if let Some(status) = self.status {
            line.number(74, 2, status.code());
        }
        if let Some(warehouse) = self.warehouse_status {
            line.number(76, 2, warehouse);
        }
        let extension = isbn::extension_field(self.isbn());
        if !extension.is_empty() {
            line.text(80, 13, extension);
        }
        line.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_ROW: &str =
        "40000030000000019629000000000107112260670000100000000000000000  000000000101    ";
    const ISBN13_ROW: &str =
        "40000030000000019629000000000107112260670000100000000000000000  000000000101    9780711226067";

    #[test]
    fn test_decode_line_item() {
        let item = PoaLineItem::from_line(VALID_ROW).unwrap();
        assert_eq!(item.sequence_number, 3);
        assert_eq!(item.supplier_poa_number, "0000000019629");
        assert_eq!(item.line_item_number, "0000000001");
        assert_eq!(item.isbn(), Some("9780711226067"));
        assert_eq!(item.order_qty, 1);
        assert_eq!(item.unit_price, Price::ZERO);
        assert_eq!(item.nett_price, Price::ZERO);
        assert_eq!(item.list_nett_indicator, ' ');
        assert_eq!(item.special_price, ' ');
        assert_eq!(item.discount, 0);
        assert_eq!(item.shippable_qty, 1);
        assert_eq!(item.status, Some(PoaStatus::new(1)));
        assert_eq!(item.outcome(), Outcome::Accepted);
        assert_eq!(item.warehouse_status, None);
    }

    #[test]
    fn test_prefers_isbn13_extension() {
        let item = PoaLineItem::from_line(ISBN13_ROW).unwrap();
        assert_eq!(item.isbn(), Some("9780711226067"));
        assert_eq!(item.isbn10().as_deref(), Some("0711226067"));
        assert!(item.has_valid_isbn());
    }

    #[test]
    fn test_to_wire_reproduces_source() {
        let item = PoaLineItem::from_line(ISBN13_ROW).unwrap();
        assert_eq!(item.to_wire(), ISBN13_ROW);
    }

    #[test]
    fn test_prices_keep_their_cents() {
        let line = ISBN13_ROW.replacen("00000000000000000", "00002995000002247", 1);
        let item = PoaLineItem::from_line(&line).unwrap();
        assert_eq!(item.unit_price, Price::from_cents(2995));
        assert_eq!(item.nett_price, Price::from_cents(2247));
        assert_eq!(item.to_wire(), line);
    }

    #[test]
    fn test_warehouse_status() {
        let mut item = PoaLineItem::from_line(ISBN13_ROW).unwrap();
        item.warehouse_status = Some(3);
        let line = item.to_wire();
        assert_eq!(&line[76..78], "03");
        assert_eq!(PoaLineItem::from_line(&line).unwrap().warehouse_status, Some(3));
    }

    #[test]
    fn test_blank_status_columns_stay_blank() {
        let line = format!("{}    {}", &ISBN13_ROW[..74], &ISBN13_ROW[78..]);
        let item = PoaLineItem::from_line(&line).unwrap();
        assert_eq!(item.status, None);
        assert_eq!(item.warehouse_status, None);
        assert_eq!(item.outcome(), Outcome::Unknown);
        assert_eq!(item.to_wire(), line);
    }

    #[test]
    fn test_zero_status_is_kept() {
        let line = format!("{}0012{}", &ISBN13_ROW[..74], &ISBN13_ROW[78..]);
        let item = PoaLineItem::from_line(&line).unwrap();
        assert_eq!(item.status, Some(PoaStatus::new(0)));
        assert_eq!(item.warehouse_status, Some(12));
        assert_eq!(item.to_wire(), line);
    }

    #[test]
    fn test_979_isbn_round_trips() {
        let line = format!(
            "{}          {}9791034304394",
            &ISBN13_ROW[..30],
            &ISBN13_ROW[40..80]
        );
        let item = PoaLineItem::from_line(&line).unwrap();
        assert_eq!(item.isbn(), Some("9791034304394"));
        assert_eq!(item.isbn10(), None);
        assert_eq!(item.to_wire(), line);
    }

    #[test]
    fn test_oversized_quantities_are_capped() {
        let mut item = PoaLineItem::from_line(ISBN13_ROW).unwrap();
        item.order_qty = 100_000;
        item.shippable_qty = 250_000;
        let line = item.to_wire();
        assert_eq!(&line[40..45], "99999");
        assert_eq!(&line[69..74], "99999");
    }

    #[test]
    fn test_rejects_other_records() {
        assert!(matches!(
            PoaLineItem::from_line("5900056"),
            Err(BisacError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_sequence_number() {
        let line = ISBN13_ROW.replacen("00003", "   ab", 1);
        assert!(matches!(
            PoaLineItem::from_line(&line),
            Err(BisacError::InvalidFile(_))
        ));
        let item = PoaLineItem::decode(&line, RecoveryMode::Lenient).unwrap();
        assert_eq!(item.sequence_number, 0);
    }

    #[test]
    fn test_no_extension_without_valid_isbn13() {
        let mut item = PoaLineItem::new();
        item.set_isbn("ABC123");
        let line = item.render(3);
        assert_eq!(line.chars().count(), POA_RECORD_WIDTH);
        assert_eq!(read_field(&line, 30, 10), "ABC123");
        assert_eq!(item.isbn10(), None);
    }
}
