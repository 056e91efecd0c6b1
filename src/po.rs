//! Purchase orders.
//!
//! A purchase order file is a run of 80 character records:
//!
//! | Record | Content                                             |
//! |--------|-----------------------------------------------------|
//! | `00`   | file header: sender, receiver, file date and name   |
//! | `10`   | order header: PO number, dates, shipping options    |
//! | `40`   | line item, optionally followed by `41` and `42`     |
//! | `50`   | order control totals                                |
//! | `90`   | file trailer with record counts per record group    |
//!
//! See [`PoLineItem`] for the line item records. Control and trailer totals
//! are never stored; they are recomputed from the items on output.

use crate::dispatch::{check_total, BisacMessage};
use crate::error::{BisacError, Result};
use crate::field::{read_field, read_flag, read_number, FixedLine};
use crate::po_line_item::{PoLineItem, PO_RECORD_WIDTH};
use crate::record_type::{PoRecordType, RecordKind};
use crate::recovery::RecoveryMode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Record groups counted by the trailer: `00`–`09` through `60`–`69`.
const TRAILER_GROUPS: usize = 7;

/// A single BISAC purchase order.
///
/// # Examples
///
/// ```
/// use bisac::{BisacMessage, Po, PoLineItem};
///
/// let mut po = Po::new();
/// po.po_number = "14976".to_string();
///
/// let mut item = PoLineItem::new();
/// item.set_isbn("0297851322");
/// item.qty = 4;
/// po.items.push(item);
///
/// let text = po.to_bisac();
/// let parsed = Po::load_from_str(&text)?.unwrap();
/// assert_eq!(parsed.total_qty(), 4);
/// # Ok::<(), bisac::BisacError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Po {
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
    /// Purchase order number
    pub po_number: String,
    /// Order date, `YYMMDD`. The file date is written when blank.
    pub order_date: String,
    /// Cancel the order if not filled by this date, `YYMMDD`
    pub cancellation_date: String,
    /// Whether unavailable items may be backordered
    pub backorder: bool,
    /// Action when the order would exceed the amount below
    pub do_not_exceed_action: String,
    /// Do-not-exceed amount
    pub do_not_exceed_amount: String,
    /// Number of invoice copies requested
    pub invoice_copies: String,
    /// Whether the order carries special instructions
    pub special_instructions: bool,
    /// Do not ship before this date, `YYMMDD`
    pub do_not_ship_before: String,
    /// Ordered items
    pub items: Vec<PoLineItem>,
}

impl Default for Po {
    fn default() -> Self {
        Po {
            source_san: String::new(),
            source_suffix: String::new(),
            source_name: String::new(),
            date: String::new(),
            filename: String::new(),
            format_version: String::new(),
            destination_san: String::new(),
            destination_suffix: String::new(),
            po_number: String::new(),
            order_date: String::new(),
            cancellation_date: "000000".to_string(),
            backorder: true,
            do_not_exceed_action: String::new(),
            do_not_exceed_amount: String::new(),
            invoice_copies: String::new(),
            special_instructions: false,
            do_not_ship_before: "000000".to_string(),
            items: Vec::new(),
        }
    }
}

impl Po {
    define_message_parsers!("purchase order");

    /// Create an empty purchase order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the ordered quantities.
    #[must_use]
    pub fn total_qty(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
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
    }

    fn decode_order_header(&mut self, line: &str) {
        self.po_number = read_field(line, 7, 12).to_string();
        self.order_date = read_field(line, 44, 6).to_string();
        self.cancellation_date = read_field(line, 50, 6).to_string();
        self.backorder = read_flag(line, 56);
        self.do_not_exceed_action = read_field(line, 57, 1).to_string();
        self.do_not_exceed_amount = read_field(line, 58, 7).to_string();
        self.invoice_copies = read_field(line, 65, 2).to_string();
        self.special_instructions = read_flag(line, 67);
        self.do_not_ship_before = read_field(line, 73, 6).to_string();
    }

    fn apply_continuation(
        &mut self,
        record: PoRecordType,
        line: &str,
        mode: RecoveryMode,
    ) -> Result<()> {
        let text = PoLineItem::continuation_text(line).to_string();
        match self.items.last_mut() {
            Some(item) if record == PoRecordType::LineItemTitle => item.title = text,
            Some(item) => item.author = text,
            None => mode.recover(
                BisacError::InvalidFile(format!(
                    "record {} has no preceding line item",
                    record.marker()
                )),
                "PO continuation record",
            )?,
        }
        Ok(())
    }

    fn check_totals(&self, line: &str, items: (usize, usize), qty: (usize, usize)) {
        let item_count = self.items.len() as u64;
        check_total(Self::NAME, "line items", read_number(line, items.0, items.1), item_count);
        check_total(Self::NAME, "quantity", read_number(line, qty.0, qty.1), self.total_qty());
    }

    fn file_header_line(&self) -> String {
        let mut line = FixedLine::new(PO_RECORD_WIDTH);
        line.literal(0, PoRecordType::FileHeader.marker())
            .number(2, 5, 1)
            .text(7, 7, &self.source_san)
            .text(14, 5, &self.source_suffix)
            .text(19, 13, &self.source_name)
            .text(32, 6, &self.date)
            .text(38, 22, &self.filename)
            .text(60, 3, &self.format_version)
            .text(63, 7, &self.destination_san)
            .text(70, 5, &self.destination_suffix);
        line.finish()
    }

    fn order_header_line(&self) -> String {
        let order_date = if self.order_date.is_empty() {
            &self.date
        } else {
            &self.order_date
        };
        let mut line = FixedLine::new(PO_RECORD_WIDTH);
        line.literal(0, PoRecordType::PurchaseOrder.marker())
            .number(2, 5, 2)
            .text(8, 11, &self.po_number)
            .text(20, 7, &self.source_san)
            .text(27, 5, &self.source_suffix)
            .text(32, 7, &self.destination_san)
            .text(39, 5, &self.destination_suffix)
            .text(44, 6, order_date)
            .text(50, 6, &self.cancellation_date)
            .flag(56, self.backorder)
            .text(57, 1, &self.do_not_exceed_action)
            .text(58, 7, &self.do_not_exceed_amount)
            .text(65, 2, &self.invoice_copies)
            .flag(67, self.special_instructions)
            .text(73, 6, &self.do_not_ship_before);
        line.finish()
    }
}

impl BisacMessage for Po {
    type Record = PoRecordType;

    const NAME: &'static str = "PO";

    fn apply(&mut self, record: PoRecordType, line: &str, mode: RecoveryMode) -> Result<()> {
        match record {
            PoRecordType::FileHeader => self.decode_file_header(line),
            PoRecordType::PurchaseOrder => self.decode_order_header(line),
            PoRecordType::LineItem => self.items.push(PoLineItem::decode(line, mode)?),
            PoRecordType::LineItemTitle | PoRecordType::LineItemAuthor => {
                self.apply_continuation(record, line, mode)?;
            },
            PoRecordType::Control => self.check_totals(line, (25, 10), (35, 10)),
            PoRecordType::FileTrailer => self.check_totals(line, (7, 13), (25, 10)),
        }
        Ok(())
    }

    fn to_bisac(&self) -> String {
        let mut lines = vec![self.file_header_line(), self.order_header_line()];

        let mut sequence = 3;
        for (index, item) in self.items.iter().enumerate() {
            let mut item = Cow::Borrowed(item);
            if item.po_number.is_empty() {
                item.to_mut().po_number.clone_from(&self.po_number);
            }
            if item.line_item_number.is_empty() {
                item.to_mut().line_item_number = (index + 1).to_string();
            }
            lines.extend(item.render(sequence));
            sequence += 3;
        }

        let total_qty: u64 = self.items.iter().map(|i| u64::from(i.written_qty())).sum();
        let item_count = self.items.len();

        // Record count for the order covers everything after the file header,
        // this record included.
        let mut control = FixedLine::new(PO_RECORD_WIDTH);
        control
            .literal(0, PoRecordType::Control.marker())
            .number(2, 5, lines.len() + 1)
            .text(8, 12, &self.po_number)
            .number(20, 5, lines.len())
            .number(25, 10, item_count)
            .number(35, 10, total_qty);
        lines.push(control.finish());

        let mut groups = [0usize; TRAILER_GROUPS];
        for line in &lines {
            if let Some(count) =
                PoRecordType::classify(line).and_then(|record| groups.get_mut(record.group()))
            {
                *count += 1;
            }
        }

        let mut trailer = FixedLine::new(PO_RECORD_WIDTH);
        trailer
            .literal(0, PoRecordType::FileTrailer.marker())
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

impl fmt::Display for Po {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_bisac())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::build_message;
    use crate::price::Price;

    const PO_FILE: &str = "\
00000019013725     Rainbow Book 061112INTERNET.BSC          F039021000
1000002 14976       9013725     9021000     061112000000Y 000000001N     000000
4000003 14976       Y000000000102978513220000100000000000000000000550000000
4100004 14976        Les Miserables
4200005 14976        Hugo, Victor
4000006 14976       Y000000000207538214940000200000000000000000000400000000
5000007 14976       0000600000000020000000003
9000008000000000000200001000000000300001000010000000000000040000100000";

    fn parse(text: &str) -> Po {
        Po::load_from_str(text).unwrap().unwrap()
    }

    #[test]
    fn test_decode_headers() {
        let po = parse(PO_FILE);
        assert_eq!(po.source_san, "9013725");
        assert_eq!(po.source_suffix, "");
        assert_eq!(po.source_name, "Rainbow Book");
        assert_eq!(po.date, "061112");
        assert_eq!(po.filename, "INTERNET.BSC");
        assert_eq!(po.format_version, "F03");
        assert_eq!(po.destination_san, "9021000");
        assert_eq!(po.destination_suffix, "");
        assert_eq!(po.po_number, "14976");
        assert_eq!(po.order_date, "061112");
        assert_eq!(po.cancellation_date, "000000");
        assert!(po.backorder);
        assert_eq!(po.do_not_exceed_action, "");
        assert_eq!(po.do_not_exceed_amount, "0000000");
        assert_eq!(po.invoice_copies, "01");
        assert!(!po.special_instructions);
        assert_eq!(po.do_not_ship_before, "000000");
    }

    #[test]
    fn test_decode_items_with_continuations() {
        let po = parse(PO_FILE);
        assert_eq!(po.items.len(), 2);
        assert_eq!(po.items[0].title, "Les Miserables");
        assert_eq!(po.items[0].author, "Hugo, Victor");
        assert_eq!(po.items[1].title, "");
        assert_eq!(po.items[1].isbn(), Some("9780753821497"));
        assert_eq!(po.total_qty(), 3);
    }

    #[test]
    fn test_defaults() {
        let po = Po::new();
        assert_eq!(po.cancellation_date, "000000");
        assert_eq!(po.do_not_ship_before, "000000");
        assert!(po.backorder);
        assert_eq!(po.total_qty(), 0);
    }

    #[test]
    fn test_to_bisac_frames_message() {
        let po = parse(PO_FILE);
        let text = po.to_bisac();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("0000001"));
        assert!(lines[1].starts_with("1000002"));
        assert!(lines[2].starts_with("4000003"));
        assert!(lines[3].starts_with("4100004"));
        assert!(lines[4].starts_with("4200005"));
        assert!(lines[5].starts_with("4000006"));
        assert!(lines[6].starts_with("5000007"));
        assert!(lines[7].starts_with("9000008"));
        assert_eq!(lines.len(), 8);
        assert!(lines[..2].iter().all(|l| l.chars().count() == PO_RECORD_WIDTH));
    }

    #[test]
    fn test_control_and_trailer_totals() {
        let po = parse(PO_FILE);
        let text = po.to_bisac();
        let lines: Vec<&str> = text.lines().collect();

        let control = lines[6];
        assert_eq!(read_field(control, 8, 12), "14976");
        assert_eq!(read_number::<u32>(control, 20, 5), 6);
        assert_eq!(read_number::<u32>(control, 25, 10), 2);
        assert_eq!(read_number::<u32>(control, 35, 10), 3);

        let trailer = lines[7];
        assert_eq!(read_number::<u32>(trailer, 7, 13), 2);
        assert_eq!(read_number::<u32>(trailer, 20, 5), 1);
        assert_eq!(read_number::<u32>(trailer, 25, 10), 3);
        assert_eq!(read_number::<u32>(trailer, 35, 5), 1);
        assert_eq!(read_number::<u32>(trailer, 40, 5), 1);
        assert_eq!(read_number::<u32>(trailer, 45, 5), 0);
        assert_eq!(read_number::<u32>(trailer, 55, 5), 4);
        assert_eq!(read_number::<u32>(trailer, 60, 5), 1);
        assert_eq!(read_number::<u32>(trailer, 65, 5), 0);
    }

    #[test]
    fn test_totals_follow_item_changes() {
        let mut po = parse(PO_FILE);
        po.items.remove(0);
        let text = po.to_bisac();
        let trailer = text.lines().last().unwrap();
        assert!(trailer.starts_with("9000005"));
        assert_eq!(read_number::<u32>(trailer, 7, 13), 1);
        assert_eq!(read_number::<u32>(trailer, 25, 10), 2);
    }

    #[test]
    fn test_totals_match_capped_quantities() {
        let mut po = parse(PO_FILE);
        po.items[0].qty = 150_000;
        let text = po.to_bisac();
        let lines: Vec<&str> = text.lines().collect();

        let expected = u64::from(crate::field::MAX_QTY) + 2;
        assert_eq!(read_number::<u64>(lines[6], 35, 10), expected);
        assert_eq!(read_number::<u64>(lines[7], 25, 10), expected);
        assert_eq!(parse(&text).total_qty(), expected);
    }

    #[test]
    fn test_round_trip() {
        let po = parse(PO_FILE);
        let again = parse(&po.to_bisac());
        assert_eq!(again, po);
        assert_eq!(po.to_string(), po.to_bisac());
    }

    #[test]
    fn test_new_items_take_message_po_number() {
        let mut po = Po::new();
        po.po_number = "88123".to_string();
        let mut item = PoLineItem::new();
        item.set_isbn("9780385519854");
        item.qty = 6;
        item.price = Price::from_cents(1999);
        po.items.push(item.clone());
        po.items.push(item);

        let parsed = parse(&po.to_bisac());
        assert_eq!(parsed.items[0].po_number, "88123");
        assert_eq!(parsed.items[0].line_item_number, "0000000001");
        assert_eq!(parsed.items[1].line_item_number, "0000000002");
        assert_eq!(parsed.items[1].sequence_number, 6);
        assert_eq!(parsed.items[1].price, Price::from_cents(1999));
    }

    #[test]
    fn test_orphan_continuation() {
        let lines = [
            "00000019013725",
            "1000002 14976",
            "4100003 14976        Orphan title",
            "9000004",
        ];
        let err = build_message::<Po, _>(&lines, RecoveryMode::Strict, 1).unwrap_err();
        assert!(err.to_string().contains("line 3"), "got: {err}");

        let po = build_message::<Po, _>(&lines, RecoveryMode::Lenient, 1).unwrap();
        assert!(po.items.is_empty());
    }

    #[test]
    fn test_lenient_sequence_number() {
        let text = PO_FILE.replacen("4000006", "40000x6", 1);
        assert!(Po::load_from_str(&text).is_err());

        let po = Po::parse_str(&text)
            .with_recovery_mode(RecoveryMode::Lenient)
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(po.items[1].sequence_number, 0);
    }

    #[test]
    fn test_to_json() {
        let po = parse(PO_FILE);
        let json = po.to_json().unwrap();
        assert_eq!(json["po_number"], "14976");
        assert_eq!(json["items"][0]["qty"], 1);
    }
}
