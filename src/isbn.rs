//! ISBN-10 and ISBN-13 validation and conversion.
//!
//! BISAC predates ISBN-13: its standard ISBN field is ten characters wide and
//! the 13-digit form travels in a non-standard extension column. The line
//! item codecs use these functions to keep ISBN-13 as the in-memory form while
//! still writing a correct ISBN-10 into the standard field.
//!
//! All functions are stateless and accept input with or without hyphens and
//! spaces.
//!
//! # Examples
//!
//! ```
//! use bisac::isbn;
//!
//! assert_eq!(isbn::to_isbn13("0297851322").as_deref(), Some("9780297851325"));
//! assert_eq!(isbn::to_isbn10("978-0-297-85132-5").as_deref(), Some("0297851322"));
//! assert_eq!(isbn::to_isbn13("0297851323"), None);
//! ```

/// Remove hyphens and spaces from an ISBN.
///
/// ```
/// use bisac::isbn::normalize;
///
/// assert_eq!(normalize("978-0-306-40615-7"), "9780306406157");
/// ```
#[must_use]
pub fn normalize(isbn: &str) -> String {
    isbn.replace(['-', ' '], "")
}

/// Validate an ISBN-10 checksum.
///
/// Digits are weighted 10 down to 1 and the sum must be divisible by 11. The
/// check digit may be `X` (representing 10).
#[must_use]
pub fn is_valid_isbn10(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 10 {
        return false;
    }

    let mut sum = 0;
    for (i, ch) in clean.chars().enumerate() {
        let digit = match (i, ch) {
            (9, 'X' | 'x') => 10,
            _ => match ch.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * (10 - u32::try_from(i).unwrap_or(0));
    }

    sum % 11 == 0
}

/// Validate an ISBN-13 checksum.
///
/// The value must carry a Bookland prefix (`978` or `979`); digits are
/// weighted alternately 1 and 3 and the sum must be divisible by 10.
#[must_use]
pub fn is_valid_isbn13(isbn: &str) -> bool {
    let clean = normalize(isbn);
    if clean.len() != 13 || !(clean.starts_with("978") || clean.starts_with("979")) {
        return false;
    }

    let mut sum = 0;
    for (i, ch) in clean.chars().enumerate() {
        match ch.to_digit(10) {
            Some(digit) => sum += if i % 2 == 0 { digit } else { digit * 3 },
            None => return false,
        }
    }

    sum % 10 == 0
}

fn isbn10_check_digit(first_nine: &str) -> char {
    let sum: u32 = first_nine
        .chars()
        .filter_map(|c| c.to_digit(10))
        .zip((2..=10).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    match (11 - sum % 11) % 11 {
        10 => 'X',
        check => char::from_digit(check, 10).unwrap_or('0'),
    }
}

fn isbn13_check_digit(first_twelve: &str) -> char {
    let sum: u32 = first_twelve
        .chars()
        .filter_map(|c| c.to_digit(10))
        .enumerate()
        .map(|(i, digit)| if i % 2 == 0 { digit } else { digit * 3 })
        .sum();
    char::from_digit((10 - sum % 10) % 10, 10).unwrap_or('0')
}

/// Convert to the canonical ISBN-13.
///
/// A valid ISBN-10 gains the `978` prefix and a recomputed check digit; a
/// valid ISBN-13 is returned without hyphens. Anything else is `None`.
#[must_use]
pub fn to_isbn13(isbn: &str) -> Option<String> {
    let clean = normalize(isbn);
    if is_valid_isbn13(&clean) {
        return Some(clean);
    }
    if !is_valid_isbn10(&clean) {
        return None;
    }

    let body = format!("978{}", &clean[..9]);
    let check = isbn13_check_digit(&body);
    Some(format!("{body}{check}"))
}

/// Convert to the canonical ISBN-10.
///
/// Only ISBN-13s with the `978` prefix have an ISBN-10 form. A valid ISBN-10
/// is returned without hyphens and with an upper case `X`. Anything else is
/// `None`.
#[must_use]
pub fn to_isbn10(isbn: &str) -> Option<String> {
    let clean = normalize(isbn);
    if is_valid_isbn10(&clean) {
        return Some(clean.to_ascii_uppercase());
    }
    if !is_valid_isbn13(&clean) || !clean.starts_with("978") {
        return None;
    }

    let body = &clean[3..12];
    Some(format!("{body}{}", isbn10_check_digit(body)))
}

/// Canonical in-memory form of an ISBN read from a record.
///
/// Prefers the 13-digit extension field when it is non-empty, otherwise
/// falls back to the standard 10-digit field, converted to 13 digits when it
/// is a valid ISBN-10. Values that cannot be converted are kept as read; an
/// empty field is `None`.
pub(crate) fn preferred(isbn13_field: &str, isbn10_field: &str) -> Option<String> {
    let chosen = if isbn13_field.is_empty() {
        isbn10_field
    } else {
        isbn13_field
    };
    canonical(chosen)
}

/// Convert a caller-supplied ISBN to its in-memory form.
pub(crate) fn canonical(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    to_isbn13(value).or_else(|| Some(value.to_string()))
}

/// Value for the standard 10-character ISBN field.
///
/// A valid ISBN-13 without an ISBN-10 form (the `979` range) leaves the field
/// blank. Values that are not ISBNs at all are written as given.
pub(crate) fn standard_field(isbn: Option<&str>) -> String {
    match isbn {
        Some(value) if is_valid_isbn13(value) => to_isbn10(value).unwrap_or_default(),
        Some(value) => to_isbn10(value).unwrap_or_else(|| value.to_string()),
        None => String::new(),
    }
}

/// Value for the 13-character extension field; blank unless valid.
pub(crate) fn extension_field(isbn: Option<&str>) -> &str {
    match isbn {
        Some(value) if is_valid_isbn13(value) => value,
        _ => "",
    }
}
