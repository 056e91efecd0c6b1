//! Fixed-width field codec.
//!
//! Every BISAC record is a line of fixed width in which each field lives at a
//! known offset. This module converts between those character ranges and
//! Rust values:
//!
//! - Text fields are left-justified and padded with spaces
//! - Numeric fields are right-justified and padded with zeros
//! - Flags are a single `Y` or `N`
//!
//! Offsets and lengths count characters, not bytes, so a line decoded from a
//! Windows-1252 file keeps its column positions after conversion to UTF-8.
//!
//! Reading past the end of a line is never an error: the line is treated as
//! if it were padded with spaces to its full width. Writing an overlong value
//! silently keeps its leading characters.
//!
//! # Examples
//!
//! ```
//! use bisac::field::{read_field, FixedLine};
//!
//! let mut line = FixedLine::new(20);
//! line.literal(0, "40").number(2, 5, 3).text(7, 13, "14976");
//! let line = line.finish();
//!
//! assert_eq!(line, "4000003 14976       ");
//! assert_eq!(read_field(&line, 7, 13), "14976");
//! assert_eq!(read_field(&line, 60, 5), "");
//! ```

use crate::error::{BisacError, Result};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Side of the field a value is aligned to when it is shorter than the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    /// Value first, padding after (text fields)
    Left,
    /// Padding first, value after (numeric fields)
    Right,
}

/// Convert a character position into a byte index, clamped to the line end.
fn byte_index(line: &str, char_pos: usize) -> usize {
    if line.is_ascii() {
        return char_pos.min(line.len());
    }
    line.char_indices()
        .nth(char_pos)
        .map_or(line.len(), |(index, _)| index)
}

/// Largest quantity a five-digit quantity field can carry. Larger values
/// are written as this value.
pub const MAX_QTY: u32 = 99_999;

/// Return the characters in `[offset, offset + length)` without trimming.
///
/// The result is shorter than `length` (possibly empty) when the line ends
/// inside the range.
#[must_use]
pub fn read_raw(line: &str, offset: usize, length: usize) -> &str {
    let start = byte_index(line, offset);
    let end = byte_index(line, offset.saturating_add(length));
    &line[start..end]
}

/// Return the field at `[offset, offset + length)` trimmed of surrounding
/// whitespace.
#[must_use]
pub fn read_field(line: &str, offset: usize, length: usize) -> &str {
    read_raw(line, offset, length).trim()
}

/// Return everything from `offset` to the end of the line, trimmed.
#[must_use]
pub fn read_rest(line: &str, offset: usize) -> &str {
    line[byte_index(line, offset)..].trim()
}

/// Return the single character at `offset`, or a space past the line end.
#[must_use]
pub fn read_char(line: &str, offset: usize) -> char {
    read_raw(line, offset, 1).chars().next().unwrap_or(' ')
}

/// Read a numeric field, producing the default value (zero) when the field is
/// blank or not a number.
#[must_use]
pub fn read_number<T: FromStr + Default>(line: &str, offset: usize, length: usize) -> T {
    read_field(line, offset, length).parse().unwrap_or_default()
}

/// Read a numeric field that must be present.
///
/// # Errors
///
/// Returns [`BisacError::InvalidFile`] naming `field` when the text is blank
/// or not a number.
pub fn read_required_number<T: FromStr>(
    line: &str,
    offset: usize,
    length: usize,
    field: &str,
) -> Result<T> {
    let text = read_field(line, offset, length);
    text.parse().map_err(|_| {
        BisacError::InvalidFile(format!(
            "{field} must be numeric, found {text:?} at offset {offset}"
        ))
    })
}

/// Read a `Y`/`N` flag. Anything other than `Y` is false.
#[must_use]
pub fn read_flag(line: &str, offset: usize) -> bool {
    read_char(line, offset) == 'Y'
}

/// Render a flag as `Y` or `N`.
#[must_use]
pub fn yes_no(value: bool) -> char {
    if value {
        'Y'
    } else {
        'N'
    }
}

/// Render `value` into exactly `length` characters.
///
/// Overlong values keep their first `length` characters; short values are
/// padded with `pad` on the side opposite to `justify`.
///
/// # Examples
///
/// ```
/// use bisac::field::{write_field, Justify};
///
/// assert_eq!(write_field("42", 5, Justify::Right, '0'), "00042");
/// assert_eq!(write_field("Begg", 6, Justify::Left, ' '), "Begg  ");
/// assert_eq!(write_field("Rainbow Books", 7, Justify::Left, ' '), "Rainbow");
/// ```
#[must_use]
pub fn write_field(value: &str, length: usize, justify: Justify, pad: char) -> String {
    let count = value.chars().count();
    if count >= length {
        return value.chars().take(length).collect();
    }

    let fill: String = std::iter::repeat(pad).take(length - count).collect();
    match justify {
        Justify::Left => format!("{value}{fill}"),
        Justify::Right => format!("{fill}{value}"),
    }
}

/// Left-justify, space-pad and truncate a text value.
#[must_use]
pub fn pad_trunc(value: &str, length: usize) -> String {
    write_field(value, length, Justify::Left, ' ')
}

/// Right-justify and zero-fill a numeric value.
#[must_use]
pub fn zero_fill(value: impl Display, length: usize) -> String {
    write_field(&value.to_string(), length, Justify::Right, '0')
}

/// A record under construction.
///
/// Starts as a run of spaces of the requested width; each field is written
/// at its absolute offset. Writing beyond the current width extends the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLine {
    chars: Vec<char>,
}

impl FixedLine {
    /// Create a blank line of `width` spaces.
    #[must_use]
    pub fn new(width: usize) -> Self {
        FixedLine {
            chars: vec![' '; width],
        }
    }

    /// Write `value` into `[offset, offset + length)` with the given alignment.
    pub fn put(
        &mut self,
        offset: usize,
        length: usize,
        value: &str,
        justify: Justify,
        pad: char,
    ) -> &mut Self {
        let end = offset + length;
        if self.chars.len() < end {
            self.chars.resize(end, ' ');
        }
        for (slot, c) in self.chars[offset..end]
            .iter_mut()
            .zip(write_field(value, length, justify, pad).chars())
        {
            *slot = c;
        }
        self
    }

    /// Write a left-justified, space-padded text field.
    pub fn text(&mut self, offset: usize, length: usize, value: &str) -> &mut Self {
        self.put(offset, length, value, Justify::Left, ' ')
    }

    /// Write a right-justified, zero-filled numeric field.
    pub fn number(&mut self, offset: usize, length: usize, value: impl Display) -> &mut Self {
        self.put(offset, length, &value.to_string(), Justify::Right, '0')
    }

    /// Write a `Y`/`N` flag.
    pub fn flag(&mut self, offset: usize, value: bool) -> &mut Self {
        self.character(offset, yes_no(value))
    }

    /// Write a single character.
    pub fn character(&mut self, offset: usize, value: char) -> &mut Self {
        self.put(offset, 1, value.encode_utf8(&mut [0; 4]), Justify::Left, ' ')
    }

    /// Write `value` verbatim at `offset`, using its own length as the width.
    pub fn literal(&mut self, offset: usize, value: &str) -> &mut Self {
        self.text(offset, value.chars().count(), value)
    }

    /// Width of the line in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// True for a zero-width line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Return the finished line.
    #[must_use]
    pub fn finish(&self) -> String {
        self.chars.iter().collect()
    }
}

impl Display for FixedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.finish())
    }
}
