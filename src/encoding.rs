//! Character encoding support for BISAC files.
//!
//! BISAC predates Unicode and most files in circulation are Windows-1252
//! (Latin-1) text. Newer producers write UTF-8. Readers decode each line to a
//! Rust `String` before any field is extracted; writers encode the finished
//! text on the way out.
//!
//! - [`TextEncoding::Utf8`] — strict UTF-8, undecodable bytes are an error
//! - [`TextEncoding::Windows1252`] — every byte maps to a character
//! - [`TextEncoding::Auto`] — UTF-8 when the line is valid UTF-8, otherwise
//!   Windows-1252 (the default for readers)

use crate::error::{BisacError, Result};
use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Character encoding of a BISAC file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// UTF-8 with Windows-1252 fallback per line
    #[default]
    Auto,
    /// UTF-8 only
    Utf8,
    /// Windows-1252 (a superset of ISO-8859-1)
    Windows1252,
}

/// Decode one line of input.
///
/// # Errors
///
/// Returns `BisacError::EncodingError` if `encoding` is `Utf8` and the bytes
/// are not valid UTF-8.
pub fn decode_line(bytes: &[u8], encoding: TextEncoding) -> Result<Cow<'_, str>> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| BisacError::EncodingError(format!("Invalid UTF-8: {e}"))),
        TextEncoding::Windows1252 => Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0),
        TextEncoding::Auto => match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Cow::Borrowed(text)),
            Err(_) => Ok(WINDOWS_1252.decode_without_bom_handling(bytes).0),
        },
    }
}

/// Encode text for output.
///
/// `Auto` writes UTF-8. Characters that Windows-1252 cannot represent are
/// written as `?`, keeping every field at its width.
#[must_use]
pub fn encode_text(text: &str, encoding: TextEncoding) -> Cow<'_, [u8]> {
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Auto => Cow::Borrowed(text.as_bytes()),
        TextEncoding::Windows1252 => {
            let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
            if !had_errors {
                return bytes;
            }
            // encoding_rs substitutes numeric character references, which
            // would shift every later column.
            let replaced: String = text
                .chars()
                .map(|c| {
                    let mut buf = [0; 4];
                    let (_, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
                    if unmappable {
                        '?'
                    } else {
                        c
                    }
                })
                .collect();
            Cow::Owned(WINDOWS_1252.encode(&replaced).0.into_owned())
        },
    }
}
