//! Writing BISAC messages.
//!
//! This module provides [`BisacWriter`] for writing any [`BisacMessage`] to a
//! destination implementing [`std::io::Write`]. Each message is written as
//! its records, one per line, with every line terminated by the configured
//! line ending.
//!
//! # Examples
//!
//! Writing purchase orders to a buffer:
//!
//! ```
//! use bisac::{BisacWriter, Po};
//!
//! let mut buffer = Vec::new();
//! {
//!     let mut writer = BisacWriter::new(&mut buffer);
//!     let mut po = Po::new();
//!     po.po_number = "14976".to_string();
//!     writer.write_message(&po)?;
//!     writer.finish()?;
//! }
//! assert!(buffer.starts_with(b"0000001"));
//! # Ok::<(), bisac::BisacError>(())
//! ```
//!
//! Writing a Windows-1252 file with CR LF endings:
//!
//! ```no_run
//! use bisac::{BisacWriter, LineEnding, Poa, TextEncoding};
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::create("ack.bsc")?;
//! let mut writer = BisacWriter::new(file)
//!     .with_encoding(TextEncoding::Windows1252)
//!     .with_line_ending(LineEnding::CrLf);
//! writer.write_message(&Poa::new())?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```

use crate::dispatch::BisacMessage;
use crate::encoding::{encode_text, TextEncoding};
use crate::error::{BisacError, Result};
use std::io::Write;

/// Line terminator written after every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`, as expected by many trading partners on Windows
    CrLf,
}

impl LineEnding {
    /// The terminator bytes.
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf => b"\n",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// Writer for BISAC messages.
///
/// Messages are written one at a time. Call [`finish`](Self::finish) when done
/// to flush the destination; no further messages can be written after it.
#[derive(Debug)]
pub struct BisacWriter<W: Write> {
    writer: W,
    encoding: TextEncoding,
    line_ending: LineEnding,
    messages_written: usize,
    finished: bool,
}

impl<W: Write> BisacWriter<W> {
    /// Create a new writer producing UTF-8 text with `\n` line endings.
    ///
    /// # Examples
    ///
    /// ```
    /// use bisac::BisacWriter;
    /// let writer = BisacWriter::new(Vec::new());
    /// assert_eq!(writer.messages_written(), 0);
    /// ```
    pub fn new(writer: W) -> Self {
        BisacWriter {
            writer,
            encoding: TextEncoding::Utf8,
            line_ending: LineEnding::Lf,
            messages_written: 0,
            finished: false,
        }
    }

    /// Set the output character encoding. `Auto` writes UTF-8.
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the line terminator.
    #[must_use]
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Write a single message.
    ///
    /// Control totals are recomputed from the message content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The writer has already been finished
    /// - An I/O error occurs during writing
    pub fn write_message<M: BisacMessage>(&mut self, message: &M) -> Result<()> {
        if self.finished {
            return Err(BisacError::InvalidArgument(
                "Cannot write to a finished writer".to_string(),
            ));
        }

        let text = message.to_bisac();
        let mut lines = 0usize;
        for line in text.lines() {
            self.writer.write_all(&encode_text(line, self.encoding))?;
            self.writer.write_all(self.line_ending.as_bytes())?;
            lines += 1;
        }

        self.messages_written += 1;
        tracing::debug!(kind = M::NAME, lines, "wrote message");
        Ok(())
    }

    /// Flush the writer and mark it as finished.
    ///
    /// After calling `finish`, no more messages can be written.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the underlying writer fails.
    pub fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        self.finished = true;
        Ok(())
    }

    /// Returns the number of messages written so far.
    #[must_use]
    pub fn messages_written(&self) -> usize {
        self.messages_written
    }

    /// Consume the writer and return the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::po::Po;
    use crate::po_line_item::PoLineItem;

    fn sample_po() -> Po {
        let mut po = Po::new();
        po.po_number = "14976".to_string();
        po.source_san = "9013725".to_string();
        let mut item = PoLineItem::new();
        item.set_isbn("0297851322");
        item.qty = 2;
        item.title = "Les Misérables".to_string();
        po.items.push(item);
        po
    }

    #[test]
    fn test_write_terminates_every_line() {
        let po = sample_po();
        let mut writer = BisacWriter::new(Vec::new());
        writer.write_message(&po).unwrap();
        writer.write_message(&po).unwrap();
        assert_eq!(writer.messages_written(), 2);

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.ends_with('\n'));
        assert_eq!(output.lines().count(), 2 * po.to_bisac().lines().count());
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut writer = BisacWriter::new(Vec::new()).with_line_ending(LineEnding::CrLf);
        writer.write_message(&sample_po()).unwrap();
        let output = writer.into_inner();
        let text = String::from_utf8(output).unwrap();
        assert!(text.lines().all(|line| !line.ends_with('\r')));
        assert_eq!(text.matches("\r\n").count(), text.lines().count());
    }

    #[test]
    fn test_windows_1252_output() {
        let mut writer = BisacWriter::new(Vec::new()).with_encoding(TextEncoding::Windows1252);
        writer.write_message(&sample_po()).unwrap();
        let output = writer.into_inner();
        assert!(output.windows(4).any(|w| w == b"Mis\xe9"));
    }

    #[test]
    fn test_finished_writer_rejects_messages() {
        let mut writer = BisacWriter::new(Vec::new());
        writer.finish().unwrap();
        assert!(matches!(
            writer.write_message(&sample_po()),
            Err(BisacError::InvalidArgument(_))
        ));
    }
}
