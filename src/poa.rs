//! Purchase order acknowledgements.
//!
//! A POA file answers a purchase order line by line:
//!
//! | Record | Content                                                   |
//! |--------|-----------------------------------------------------------|
//! | `02`   | file header: as the PO file header plus acknowledgement type |
//! | `11`   | acknowledgement header: POA and PO numbers, parties, dates |
//! | `40`   | one acknowledged line, see [`PoaLineItem`]                 |
//! | `59`   | acknowledgement control totals                            |
//! | `91`   | file trailer with record counts per record group          |

use crate::dispatch::{check_total, BisacMessage};
use crate::error::Result;
use crate::field::{read_field, read_number, FixedLine};
use crate::poa_line_item::{PoaLineItem, POA_RECORD_WIDTH};
use crate::record_type::{PoaRecordType, RecordKind};
use crate::recovery::RecoveryMode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Record groups counted by the trailer: `00`–`09` through `50`–`59`.
const TRAILER_GROUPS: usize = 6;

/// A single BISAC purchase order acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Poa {
    /// SAN of the sender
    pub source_san: String,
    /// Sender SAN suffix
    pub source_suffix: String,
    /// Sender name
    pub source_name: String,
    /// File creation date, `YYMMDD`
    pub date: String,
    /// Name of the transmitted file
    pub filename: String,
    /// Format version
    pub format_version: String,
    /// SAN of the receiver
    pub destination_san: String,
    /// Receiver SAN suffix
    pub destination_suffix: String,
    /// Acknowledgement type
    pub ack_type: String,
    /// Supplier's acknowledgement number
    pub supplier_poa_number: String,
    /// Purchase order being acknowledged
    pub po_number: String,
    /// SAN of the customer who placed the order
    pub customer_san: String,
    /// Customer SAN suffix
    pub customer_suffix: String,
    /// SAN of the supplier
    pub supplier_san: String,
    /// Supplier SAN suffix
    pub supplier_suffix: String,
    /// Acknowledgement date, `YYMMDD`
    pub poa_date: String,
    /// Currency code
    pub currency: String,
    /// Date of the purchase order, `YYMMDD`
    pub po_date: String,
    /// Cancellation date of the purchase order, `YYMMDD`
    pub po_cancel_date: String,
    /// Purchase order type
    pub po_type: String,
    /// Acknowledged lines
    pub items: Vec<PoaLineItem>,
}

impl Poa {
    define_message_parsers!("purchase order acknowledgement");

    /// Create an empty acknowledgement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the ordered quantities.
    #[must_use]
    pub fn total_qty(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.order_qty)).sum()
    }

    /// Sum of the quantities that can ship.
    #[must_use]
    pub fn total_shippable_qty(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.shippable_qty))
            .sum()
    }

    fn decode_file_header(&mut self, line: &str) {
        self.source_san = read_field(line, 7, 7).to_string();
        self.source_suffix = read_field(line, 14, 5).to_string();
        self.source_name = read_field(line, 19, 13).to_string();
        self.date = read_field(line, 32, 6).to_string();
        self.filename = read_field(line, 38, 22).to_string();
        self.format_version = read_field(line, 60, 3).to_string();
        self.destination_san = read_field(line, 63, 7).to_string();
        self.destination_suffix = read_field(line, 70, 5).to_string();
        self.ack_type = read_field(line, 75, 1).to_string();
    }

    fn decode_acknowledgement(&mut self, line: &str) {
        self.supplier_poa_number = read_field(line, 7, 13).to_string();
        self.po_number = read_field(line, 20, 13).to_string();
        self.customer_san = read_field(line, 33, 7).to_string();
        self.customer_suffix = read_field(line, 40, 5).to_string();
        self.supplier_san = read_field(line, 45, 7).to_string();
        self.supplier_suffix = read_field(line, 52, 5).to_string();
        self.poa_date = read_field(line, 57, 6).to_string();
        self.currency = read_field(line, 63, 3).to_string();
        self.po_date = read_field(line, 66, 6).to_string();
        self.po_cancel_date = read_field(line, 72, 6).to_string();
        self.po_type = read_field(line, 78, 2).to_string();
    }

    fn file_header_line(&self) -> String {
        let mut line = FixedLine::new(POA_RECORD_WIDTH);
        line.literal(0, PoaRecordType::FileHeader.marker())
            .number(2, 5, 1)
            .text(7, 7, &self.source_san)
            .text(14, 5, &self.source_suffix)
            .text(19, 13, &self.source_name)
            .text(32, 6, &self.date)
            .text(38, 22, &self.filename)
            .text(60, 3, &self.format_version)
            .text(63, 7, &self.destination_san)
            .text(70, 5, &self.destination_suffix)
            .text(75, 1, &self.ack_type);
        line.finish()
    }

    fn acknowledgement_line(&self) -> String {
        let mut line = FixedLine::new(POA_RECORD_WIDTH);
        line.literal(0, PoaRecordType::Acknowledgement.marker())
            .number(2, 5, 2)
            .text(7, 13, &self.supplier_poa_number)
            .text(20, 13, &self.po_number)
            .text(33, 7, &self.customer_san)
            .text(40, 5, &self.customer_suffix)
            .text(45, 7, &self.supplier_san)
            .text(52, 5, &self.supplier_suffix)
            .text(57, 6, &self.poa_date)
            .text(63, 3, &self.currency)
            .text(66, 6, &self.po_date)
            .text(72, 6, &self.po_cancel_date)
            .text(78, 2, &self.po_type);
        line.finish()
    }
}

impl BisacMessage for Poa {
    type Record = PoaRecordType;

    const NAME: &'static str = "POA";

    fn apply(&mut self, record: PoaRecordType, line: &str, mode: RecoveryMode) -> Result<()> {
        match record {
            PoaRecordType::FileHeader => self.decode_file_header(line),
            PoaRecordType::Acknowledgement => self.decode_acknowledgement(line),
            PoaRecordType::LineItem => self.items.push(PoaLineItem::decode(line, mode)?),
            PoaRecordType::Control => {
                let items = self.items.len() as u64;
                check_total(Self::NAME, "line items", read_number(line, 20, 5), items);
                check_total(Self::NAME, "quantity", read_number(line, 25, 10), self.total_qty());
                check_total(
                    Self::NAME,
                    "shippable quantity",
                    read_number(line, 35, 10),
                    self.total_shippable_qty(),
                );
            },
            PoaRecordType::FileTrailer => {
                let items = self.items.len() as u64;
                check_total(Self::NAME, "line items", read_number(line, 7, 13), items);
                check_total(Self::NAME, "quantity", read_number(line, 25, 10), self.total_qty());
            },
        }
        Ok(())
    }

    fn to_bisac(&self) -> String {
        let mut lines = vec![self.file_header_line(), self.acknowledgement_line()];

        for (index, item) in self.items.iter().enumerate() {
            let mut item = Cow::Borrowed(item);
            if item.supplier_poa_number.is_empty() {
                item.to_mut()
                    .supplier_poa_number
                    .clone_from(&self.supplier_poa_number);
            }
            if item.line_item_number.is_empty() {
                item.to_mut().line_item_number = (index + 1).to_string();
            }
            let sequence = u32::try_from(lines.len() + 1).unwrap_or(u32::MAX);
            lines.push(item.render(sequence));
        }

        let item_count = self.items.len();
        let mut total_qty = 0u64;
        let mut total_shippable = 0u64;
        for item in &self.items {
            let (ordered, shippable) = item.written_qty();
            total_qty += u64::from(ordered);
            total_shippable += u64::from(shippable);
        }

        let mut control = FixedLine::new(POA_RECORD_WIDTH);
        control
            .literal(0, PoaRecordType::Control.marker())
            .number(2, 5, lines.len() + 1)
            .text(7, 13, &self.supplier_poa_number)
            .number(20, 5, item_count)
            .number(25, 10, total_qty)
            .number(35, 10, total_shippable);
        lines.push(control.finish());

        let mut groups = [0usize; TRAILER_GROUPS];
        for line in &lines {
            if let Some(count) =
                PoaRecordType::classify(line).and_then(|record| groups.get_mut(record.group()))
            {
                *count += 1;
            }
        }

        let mut trailer = FixedLine::new(POA_RECORD_WIDTH);
        trailer
            .literal(0, PoaRecordType::FileTrailer.marker())
            .number(2, 5, lines.len() + 1)
            .number(7, 13, item_count)
            .number(20, 5, 1)
            .number(25, 10, total_qty);
        for (group, count) in groups.iter().enumerate() {
            trailer.number(35 + group * 5, 5, count);
        }
        lines.push(trailer.finish());

        lines.join("\n")
    }
}

impl fmt::Display for Poa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bisac())
    }
}
