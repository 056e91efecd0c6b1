//! Title (product metadata) files.
//!
//! A title file announces new or updated titles to the trade. It consists of
//! a `**HEADER**` line, one 259 character [`Product`] line per title and a
//! `**TRAILER*` line carrying the product count. Header and trailer carry
//! the date the file was produced; it is stamped when the file is written
//! and never read back.

use crate::dispatch::{check_total, BisacMessage};
use crate::error::Result;
use crate::field::{read_field, read_number, FixedLine};
use crate::product::{Product, PRODUCT_LINE_WIDTH};
use crate::record_type::{TitleRecordType, TITLE_HEADER_MARKER, TITLE_TRAILER_MARKER};
use crate::recovery::RecoveryMode;
use crate::writer::BisacWriter;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Banner repeated in the header and trailer after the batch fields.
const PUBSTAT_MARKER: &str = "**PUBSTAT*";

/// Layout version written in the header.
const PUBSTAT_VERSION: &str = "040";

/// A BISAC title file.
///
/// # Examples
///
/// ```
/// use bisac::{Message, Product};
/// use chrono::NaiveDate;
///
/// let mut msg = Message::new("SAND", "9012982", "000001", "1");
/// msg.push(Product::new("0715200615")?);
///
/// let date = NaiveDate::from_ymd_opt(2006, 11, 12).unwrap();
/// let text = msg.to_bisac_dated(date);
/// assert!(text.starts_with("**HEADER**061112SAND"));
/// assert_eq!(text.lines().count(), 3);
/// # Ok::<(), bisac::BisacError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    /// Company name, up to 10 characters
    pub company: String,
    /// Company SAN, up to 12 characters
    pub san: String,
    /// Batch name, up to 6 characters
    pub batch: String,
    /// `1` for new titles, `2` for updated titles
    pub code: String,
    /// Titles in the file
    pub products: Vec<Product>,
}

impl Message {
    define_message_parsers!("title file");

    /// Create an empty title file.
    #[must_use]
    pub fn new(company: &str, san: &str, batch: &str, code: &str) -> Self {
        Message {
            company: company.to_string(),
            san: san.to_string(),
            batch: batch.to_string(),
            code: code.to_string(),
            products: Vec::new(),
        }
    }

    /// Load the first title file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a file or the content is not a
    /// title file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        Self::load_from_file(path)
    }

    /// Add a title.
    pub fn push(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Render the file stamped with `date`, without a trailing newline.
    #[must_use]
    pub fn to_bisac_dated(&self, date: NaiveDate) -> String {
        let stamp = date.format("%y%m%d").to_string();
        let mut lines = Vec::with_capacity(self.products.len() + 2);

        let mut header = FixedLine::new(PRODUCT_LINE_WIDTH);
        header
            .literal(0, TITLE_HEADER_MARKER)
            .text(10, 6, &stamp)
            .text(16, 10, &self.company)
            .text(26, 12, &self.san)
            .text(38, 6, &self.batch)
            .text(44, 1, &self.code)
            .literal(45, PUBSTAT_MARKER)
            .literal(55, PUBSTAT_VERSION);
        lines.push(header.finish());

        lines.extend(self.products.iter().map(Product::to_line));

        let mut trailer = FixedLine::new(PRODUCT_LINE_WIDTH);
        trailer
            .literal(0, TITLE_TRAILER_MARKER)
            .text(10, 6, &stamp)
            .text(16, 6, &self.batch)
            .text(22, 6, &self.products.len().to_string())
            .literal(28, PUBSTAT_MARKER);
        lines.push(trailer.finish());

        lines.join("\n")
    }

    /// Write the file to `path`, stamped with today's date.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BisacWriter::new(File::create(path)?);
        writer.write_message(self)?;
        writer.finish()
    }
}

impl BisacMessage for Message {
    type Record = TitleRecordType;

    const NAME: &'static str = "title";

    fn apply(&mut self, record: TitleRecordType, line: &str, _mode: RecoveryMode) -> Result<()> {
        match record {
            TitleRecordType::Header => {
                self.company = read_field(line, 16, 10).to_string();
                self.san = read_field(line, 26, 12).to_string();
                self.batch = read_field(line, 38, 6).to_string();
                self.code = read_field(line, 44, 1).to_string();
            },
            TitleRecordType::Product => {
                if let Some(product) = Product::from_line(line) {
                    self.products.push(product);
                }
            },
            TitleRecordType::Trailer => check_total(
                Self::NAME,
                "products",
                read_number(line, 22, 6),
                self.products.len() as u64,
            ),
        }
        Ok(())
    }

    fn to_bisac(&self) -> String {
        self.to_bisac_dated(Local::now().date_naive())
    }
}
