//! Title file product lines.
//!
//! Each product in a title (product metadata) file is one line of exactly
//! 259 characters. Most columns are separated by an `N` delimiter and many
//! hold fixed values that this library does not model (new price, audience,
//! freight pass-through and so on); they are always written with their
//! defaults.
//!
//! | Offset | Length | Field                            |
//! |--------|--------|----------------------------------|
//! | 0      | 10     | ISBN                             |
//! | 15     | 30     | title                            |
//! | 46     | 30     | author                           |
//! | 79     | 7      | price in cents, zero-filled      |
//! | 87     | 6      | publication date, `YYMMDD`       |
//! | 94     | 10     | publisher                        |
//! | 105    | 14     | imprint                          |
//! | 120    | 3      | volumes in the set               |
//! | 124    | 2      | edition                          |
//! | 127    | 2      | binding                          |
//! | 130    | 3      | volume number                    |
//! | 153    | 3      | status, right-justified          |

use crate::error::{BisacError, Result};
use crate::field::{read_field, FixedLine, Justify};
use crate::price::Price;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Width of every product line.
pub const PRODUCT_LINE_WIDTH: usize = 259;

/// Longest ISBN a product line can carry.
pub const MAX_ISBN_LEN: usize = 10;

lazy_static! {
    static ref PRICE_PATTERN: Regex = Regex::new(r"^\d{0,7}$").expect("valid price pattern");
    static ref PUBDATE_PATTERN: Regex = Regex::new(r"^\d{6}$").expect("valid pubdate pattern");
}

/// One title in a BISAC title file.
///
/// # Examples
///
/// ```
/// use bisac::Product;
///
/// let mut product = Product::new("0743285689")?;
/// product.set_title("Enemy Combatant");
/// product.set_price("2995")?;
/// product.set_pubdate("060101")?;
///
/// let line = product.to_line();
/// assert_eq!(line.chars().count(), 259);
///
/// let decoded = Product::from_line(&line).unwrap();
/// assert_eq!(decoded.title(), "Enemy Combatant");
/// assert_eq!(decoded.price(), "0002995");
/// # Ok::<(), bisac::BisacError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Product {
    isbn: String,
    title: String,
    author: String,
    price: String,
    pubdate: String,
    publisher: String,
    imprint: String,
    volumes: String,
    edition: String,
    binding: String,
    volume: String,
    status: String,
}

impl Product {
    /// Create a product for `isbn`.
    ///
    /// # Errors
    ///
    /// Returns [`BisacError::InvalidArgument`] if the ISBN is longer than ten
    /// characters.
    pub fn new(isbn: &str) -> Result<Self> {
        if isbn.chars().count() > MAX_ISBN_LEN {
            return Err(BisacError::InvalidArgument(format!(
                "isbn must be {MAX_ISBN_LEN} chars or less, got {isbn:?}"
            )));
        }
        Ok(Product {
            isbn: isbn.to_string(),
            ..Self::default()
        })
    }

    /// Decode a product line.
    ///
    /// Returns `None` for a blank line. Short lines are read as if padded
    /// with spaces. A price or publication date that does not have the
    /// expected form is left empty.
    #[must_use]
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return None;
        }

        let price = read_field(line, 79, 7);
        let pubdate = read_field(line, 87, 6);
        Some(Product {
            isbn: read_field(line, 0, 10).to_string(),
            title: read_field(line, 15, 30).to_string(),
            author: read_field(line, 46, 30).to_string(),
            price: if PRICE_PATTERN.is_match(price) {
                price.to_string()
            } else {
                String::new()
            },
            pubdate: if PUBDATE_PATTERN.is_match(pubdate) {
                pubdate.to_string()
            } else {
                String::new()
            },
            publisher: read_field(line, 94, 10).to_string(),
            imprint: read_field(line, 105, 14).to_string(),
            volumes: read_field(line, 120, 3).to_string(),
            edition: read_field(line, 124, 2).to_string(),
            binding: read_field(line, 127, 2).to_string(),
            volume: read_field(line, 130, 3).to_string(),
            status: read_field(line, 153, 3).to_string(),
        })
    }

    /// Render the product as a 259 character line, without a line ending.
    #[must_use]
    pub fn to_line(&self) -> String {
        let mut line = FixedLine::new(PRODUCT_LINE_WIDTH);
        line.text(0, 10, &self.isbn)
            .literal(10, "1NNBN")
            .text(15, 30, &self.title)
            .character(45, 'N')
            .text(46, 30, &self.author)
            // author role
            .literal(76, "NAN")
            .number(79, 7, &self.price)
            .character(86, 'N')
            .text(87, 6, &self.pubdate)
            .character(93, 'N')
            .text(94, 10, &self.publisher)
            .character(104, 'N')
            .text(105, 14, &self.imprint)
            .character(119, 'N')
            .number(120, 3, &self.volumes)
            .character(123, 'N')
            .number(124, 2, &self.edition)
            .character(126, 'N')
            .number(127, 2, &self.binding)
            .character(129, 'N')
            .number(130, 3, &self.volume)
            // new price, its effective date, audience
            .literal(133, "N0000000N000000N   N")
            .put(153, 3, &self.status, Justify::Right, ' ')
            // available date, alternate ISBN, out of print date,
            // geographic restrictions, LCCN
            .literal(156, "N      N          N999999N   N        N")
            // series title is blank; price codes and freight follow
            .literal(235, "N0N0N0000000N00000000000");
        line.finish()
    }

    /// The ISBN.
    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// The title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set the title. Written truncated to 30 characters.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Set the author. Written truncated to 30 characters.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    /// The price in cents as written, possibly empty.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    /// The price as an amount; zero when unset.
    #[must_use]
    pub fn price_amount(&self) -> Price {
        Price::from_cents(self.price.parse().unwrap_or(0))
    }

    /// Set the price in cents.
    ///
    /// # Errors
    ///
    /// Returns [`BisacError::InvalidArgument`] unless `price` is a whole
    /// number of at most seven digits.
    pub fn set_price(&mut self, price: &str) -> Result<()> {
        if !PRICE_PATTERN.is_match(price) {
            return Err(BisacError::InvalidArgument(
                "price should be a whole number with no more than 7 digits (price in cents)"
                    .to_string(),
            ));
        }
        self.price = price.to_string();
        Ok(())
    }

    /// The publication date, `YYMMDD`, possibly empty.
    #[must_use]
    pub fn pubdate(&self) -> &str {
        &self.pubdate
    }

    /// Set the publication date.
    ///
    /// # Errors
    ///
    /// Returns [`BisacError::InvalidArgument`] unless `pubdate` is six digits.
    pub fn set_pubdate(&mut self, pubdate: &str) -> Result<()> {
        if !PUBDATE_PATTERN.is_match(pubdate) {
            return Err(BisacError::InvalidArgument(
                "pubdate should be a date in the form YYMMDD".to_string(),
            ));
        }
        self.pubdate = pubdate.to_string();
        Ok(())
    }

    /// The publisher.
    #[must_use]
    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    /// Set the publisher. Written truncated to 10 characters.
    pub fn set_publisher(&mut self, publisher: impl Into<String>) {
        self.publisher = publisher.into();
    }

    /// The imprint.
    #[must_use]
    pub fn imprint(&self) -> &str {
        &self.imprint
    }

    /// Set the imprint. Written truncated to 14 characters.
    pub fn set_imprint(&mut self, imprint: impl Into<String>) {
        self.imprint = imprint.into();
    }

    /// Number of volumes in the set.
    #[must_use]
    pub fn volumes(&self) -> &str {
        &self.volumes
    }

    /// Set the number of volumes in the set. Written in 3 characters.
    pub fn set_volumes(&mut self, volumes: impl Into<String>) {
        self.volumes = volumes.into();
    }

    /// The edition.
    #[must_use]
    pub fn edition(&self) -> &str {
        &self.edition
    }

    /// Set the edition. Written in 2 characters.
    pub fn set_edition(&mut self, edition: impl Into<String>) {
        self.edition = edition.into();
    }

    /// The binding code.
    #[must_use]
    pub fn binding(&self) -> &str {
        &self.binding
    }

    /// Set the binding code. Written in 2 characters.
    pub fn set_binding(&mut self, binding: impl Into<String>) {
        self.binding = binding.into();
    }

    /// The volume number within the set.
    #[must_use]
    pub fn volume(&self) -> &str {
        &self.volume
    }

    /// Set the volume number. Written in 3 characters.
    pub fn set_volume(&mut self, volume: impl Into<String>) {
        self.volume = volume.into();
    }

    /// The status code.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Set the status code. Written right-justified in 3 characters.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_combatant() -> Product {
        let mut product = Product::new("0743285689").unwrap();
        product.set_title("Enemy Combatant");
        product.set_author("Begg, Moazzam");
        product.set_price("2995").unwrap();
        product.set_pubdate("060101").unwrap();
        product.set_publisher("Simon and Schuster");
        product.set_imprint("Free Press");
        product.set_volumes("1");
        product.set_edition("1");
        product.set_binding("PB");
        product.set_volume("1");
        product.set_status("O/O");
        product
    }

    #[test]
    fn test_line_is_259_characters() {
        let line = enemy_combatant().to_line();
        assert_eq!(line.chars().count(), PRODUCT_LINE_WIDTH);
        assert_eq!(Product::new("").unwrap().to_line().len(), PRODUCT_LINE_WIDTH);
    }

    #[test]
    fn test_line_layout() {
        let line = enemy_combatant().to_line();
        assert_eq!(&line[0..15], "07432856891NNBN");
        assert_eq!(&line[15..45], "Enemy Combatant               ");
        assert_eq!(&line[76..79], "NAN");
        assert_eq!(&line[79..87], "0002995N");
        assert_eq!(&line[87..94], "060101N");
        assert_eq!(&line[94..105], "Simon and N");
        assert_eq!(&line[120..134], "001N01NPBN001N");
        assert_eq!(&line[153..157], "O/ON");
        assert_eq!(&line[175..181], "999999");
        assert!(line.ends_with("N0000000N00000000000"));
    }

    #[test]
    fn test_status_is_right_justified() {
        let mut product = Product::new("0975240277").unwrap();
        product.set_status("OP");
        assert_eq!(&product.to_line()[153..156], " OP");
    }

    #[test]
    fn test_round_trip() {
        let product = enemy_combatant();
        let decoded = Product::from_line(&product.to_line()).unwrap();
        assert_eq!(decoded.isbn(), "0743285689");
        assert_eq!(decoded.title(), "Enemy Combatant");
        assert_eq!(decoded.author(), "Begg, Moazzam");
        assert_eq!(decoded.price(), "0002995");
        assert_eq!(decoded.price_amount(), Price::from_cents(2995));
        assert_eq!(decoded.pubdate(), "060101");
        assert_eq!(decoded.publisher(), "Simon and");
        assert_eq!(decoded.imprint(), "Free Press");
        assert_eq!(decoded.volumes(), "001");
        assert_eq!(decoded.binding(), "PB");
        assert_eq!(decoded.status(), "O/O");
    }

    #[test]
    fn test_rejects_long_isbn() {
        assert!(matches!(
            Product::new("9780743285681"),
            Err(BisacError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validated_setters() {
        let mut product = Product::new("0743285689").unwrap();
        assert!(product.set_price("29.95").is_err());
        assert!(product.set_price("12345678").is_err());
        assert!(product.set_price("").is_ok());
        assert!(product.set_pubdate("06011").is_err());
        assert!(product.set_pubdate("2006-01-01").is_err());
        assert!(product.set_pubdate("060101").is_ok());
    }

    #[test]
    fn test_from_line_skips_malformed_price_and_date() {
        let mut line: Vec<char> = enemy_combatant().to_line().chars().collect();
        line[80] = 'x';
        line[88] = '-';
        let line: String = line.into_iter().collect();
        let product = Product::from_line(&line).unwrap();
        assert_eq!(product.price(), "");
        assert_eq!(product.pubdate(), "");
    }

    #[test]
    fn test_from_line_blank() {
        assert_eq!(Product::from_line("   \r\n"), None);
    }
}
