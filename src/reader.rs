//! Reading BISAC messages from line-oriented sources.
//!
//! This module provides [`BisacReader`], which assembles the lines of any
//! [`std::io::BufRead`] source into complete messages. A file may hold any
//! number of concatenated messages; the reader yields each one as soon as its
//! trailer line has been read.
//!
//! # Examples
//!
//! Reading every purchase order in a batch:
//!
//! ```no_run
//! use bisac::Po;
//!
//! for po in Po::parse_file("orders.bsc")? {
//!     let po = po?;
//!     println!("{}: {} items", po.po_number, po.items.len());
//! }
//! # Ok::<(), bisac::BisacError>(())
//! ```
//!
//! Reading from a buffer with lenient record handling:
//!
//! ```
//! use bisac::{BisacReader, Poa, RecoveryMode};
//!
//! let data = "";
//! let mut reader = BisacReader::<_, Poa>::new(data.as_bytes())
//!     .with_recovery_mode(RecoveryMode::Lenient);
//!
//! assert!(reader.read_message()?.is_none());
//! # Ok::<(), bisac::BisacError>(())
//! ```

use crate::dispatch::{build_message, BisacMessage};
use crate::encoding::{decode_line, TextEncoding};
use crate::error::{BisacError, Result};
use crate::record_type::RecordKind;
use crate::recovery::RecoveryMode;
use std::io::BufRead;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Where the reader is in assembling the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssemblyState {
    /// No lines of the next message have been read
    #[default]
    AwaitingHeader,
    /// Header read, collecting detail lines until the trailer
    AccumulatingDetail,
    /// The trailer was read and the message has been emitted
    Complete,
}

/// Reader for BISAC messages of kind `M`.
///
/// `BisacReader` pulls one line at a time from the source and returns each
/// message when its trailer is reached. If the source ends before a trailer,
/// the collected lines are still validated so that the missing trailer is
/// reported as an error rather than the data being silently dropped.
///
/// After an error the reader is exhausted: [`read_message`](Self::read_message)
/// returns `Ok(None)` and the iterator returns `None`.
///
/// Blank lines are skipped and both `\n` and `\r\n` line endings are accepted.
#[derive(Debug)]
pub struct BisacReader<R: BufRead, M: BisacMessage> {
    reader: R,
    recovery_mode: RecoveryMode,
    encoding: TextEncoding,
    state: AssemblyState,
    pending: Vec<String>,
    pending_start: usize,
    lines_read: usize,
    messages_read: usize,
    finished: bool,
    buffer: Vec<u8>,
    _message: PhantomData<fn() -> M>,
}

impl<R: BufRead, M: BisacMessage> BisacReader<R, M> {
    /// Create a new reader over `reader`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bisac::{BisacReader, Po};
    ///
    /// let reader = BisacReader::<_, Po>::new("".as_bytes());
    /// assert_eq!(reader.messages_read(), 0);
    /// ```
    pub fn new(reader: R) -> Self {
        BisacReader {
            reader,
            recovery_mode: RecoveryMode::Strict,
            encoding: TextEncoding::Auto,
            state: AssemblyState::AwaitingHeader,
            pending: Vec::new(),
            pending_start: 0,
            lines_read: 0,
            messages_read: 0,
            finished: false,
            buffer: Vec::with_capacity(128),
            _message: PhantomData,
        }
    }

    /// Set the recovery mode for handling malformed records.
    ///
    /// - `Strict`: Return errors immediately (default)
    /// - `Lenient`: Log, substitute defaults and keep going
    #[must_use]
    pub fn with_recovery_mode(mut self, mode: RecoveryMode) -> Self {
        self.recovery_mode = mode;
        self
    }

    /// Set the character encoding of the source (default: `Auto`).
    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Read the next complete message.
    ///
    /// Returns `Ok(Some(message))` when a message was assembled, `Ok(None)`
    /// at end of input, or `Err` if the message is malformed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The lines of a message do not form a valid header/detail/trailer frame
    /// - A record is malformed in strict mode
    /// - A line cannot be decoded in the configured encoding
    /// - An I/O error occurs
    pub fn read_message(&mut self) -> Result<Option<M>> {
        if self.finished {
            return Ok(None);
        }
        let result = self.assemble();
        if result.is_err() {
            self.finished = true;
            self.pending.clear();
        }
        result
    }

    /// Number of messages read so far.
    #[must_use]
    pub fn messages_read(&self) -> usize {
        self.messages_read
    }

    /// Number of source lines consumed so far, blank lines included.
    #[must_use]
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Current assembly state.
    #[must_use]
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    fn assemble(&mut self) -> Result<Option<M>> {
        loop {
            let Some(line) = self.next_line()? else {
                self.finished = true;
                if self.pending.is_empty() {
                    return Ok(None);
                }
                tracing::debug!(
                    kind = M::NAME,
                    lines = self.pending.len(),
                    "input ended before the trailer"
                );
                return self.complete().map(Some);
            };

            if line.trim().is_empty() {
                continue;
            }

            if self.state == AssemblyState::AccumulatingDetail && M::Record::is_header(&line) {
                // A new header before the trailer: the open message is cut short.
                return self.complete().map(Some);
            }

            if self.state != AssemblyState::AccumulatingDetail {
                self.state = AssemblyState::AccumulatingDetail;
                self.pending_start = self.lines_read;
            }

            let is_footer = M::Record::is_footer(&line);
            self.pending.push(line);
            if is_footer {
                return self.complete().map(Some);
            }
        }
    }

    fn complete(&mut self) -> Result<M> {
        let lines = std::mem::take(&mut self.pending);
        self.state = AssemblyState::Complete;
        let message = build_message::<M, _>(&lines, self.recovery_mode, self.pending_start)?;
        self.messages_read += 1;
        tracing::debug!(
            kind = M::NAME,
            lines = lines.len(),
            message = self.messages_read,
            "assembled message"
        );
        Ok(message)
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        if self.reader.read_until(b'\n', &mut self.buffer)? == 0 {
            return Ok(None);
        }
        self.lines_read += 1;

        let mut bytes = self.buffer.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }

        match decode_line(bytes, self.encoding) {
            Ok(text) => Ok(Some(text.into_owned())),
            Err(BisacError::EncodingError(reason)) => Err(BisacError::EncodingError(format!(
                "line {}: {reason}",
                self.lines_read
            ))),
            Err(other) => Err(other),
        }
    }
}

impl<R: BufRead, M: BisacMessage> Iterator for BisacReader<R, M> {
    type Item = Result<M>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_message().transpose()
    }
}

impl<R: BufRead, M: BisacMessage> FusedIterator for BisacReader<R, M> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::po::Po;
    use crate::poa::Poa;

    const PO_HEADER: &str =
        "00000019013725     Rainbow Book 061112INTERNET.BSC          F039021000";
    const PO_ORDER: &str =
        "1000002 14976       9013725     9021000     061112000000Y 000000001N     000000";
    const PO_ITEM: &str =
        "4000003 14976       Y000000000102978513220000100000000000000000000550000000";
    const PO_TRAILER: &str = "9000004000000000000100001";

    fn po_message() -> String {
        [PO_HEADER, PO_ORDER, PO_ITEM, PO_TRAILER].join("\n")
    }

    #[test]
    fn test_reads_single_message() {
        let data = po_message();
        let mut reader = BisacReader::<_, Po>::new(data.as_bytes());

        let po = reader.read_message().unwrap().unwrap();
        assert_eq!(po.po_number, "14976");
        assert_eq!(po.items.len(), 1);
        assert_eq!(reader.state(), AssemblyState::Complete);

        assert!(reader.read_message().unwrap().is_none());
        assert_eq!(reader.messages_read(), 1);
    }

    #[test]
    fn test_reads_concatenated_messages() {
        let data = format!("{}\n{}\n\n{}\n", po_message(), po_message(), po_message());
        let reader = BisacReader::<_, Po>::new(data.as_bytes());
        let messages: Vec<Po> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(messages.len(), 3);
    }

    #[test]
    fn test_accepts_crlf() {
        let data = po_message().replace('\n', "\r\n");
        let po = BisacReader::<_, Po>::new(data.as_bytes())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(po.destination_san, "9021000");
        assert_eq!(po.items[0].isbn(), Some("9780297851325"));
    }

    #[test]
    fn test_missing_footer_at_end_of_input() {
        let data = [PO_HEADER, PO_ORDER, PO_ITEM].join("\n");
        let mut reader = BisacReader::<_, Po>::new(data.as_bytes());
        let err = reader.read_message().unwrap_err();
        assert!(matches!(err, BisacError::InvalidFile(_)));
        assert!(err.to_string().contains("footer"));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_header_before_footer_ends_open_message() {
        let data = [PO_HEADER, PO_ORDER, PO_ITEM, PO_HEADER, PO_ORDER, PO_ITEM, PO_TRAILER]
            .join("\n");
        let mut reader = BisacReader::<_, Po>::new(data.as_bytes());
        let err = reader.read_message().unwrap_err();
        assert!(err.to_string().contains("Missing footer"));
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let data = po_message();
        let mut reader = BisacReader::<_, Poa>::new(data.as_bytes());
        let err = reader.read_message().unwrap_err();
        assert!(err.to_string().contains("Missing header"), "got: {err}");
    }

    #[test]
    fn test_counts_lines() {
        let data = format!("{}\n\n", po_message());
        let mut reader = BisacReader::<_, Po>::new(data.as_bytes());
        while reader.read_message().unwrap().is_some() {}
        assert_eq!(reader.lines_read(), 5);
    }

    #[test]
    fn test_latin1_source() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(PO_HEADER.as_bytes());
        bytes.extend_from_slice(b"\n");
        bytes.extend_from_slice(PO_ORDER.as_bytes());
        bytes.extend_from_slice(b"\n");
        bytes.extend_from_slice(PO_ITEM.as_bytes());
        bytes.extend_from_slice(b"\n4100004 14976        Les Mis\xe9rables\n");
        bytes.extend_from_slice(PO_TRAILER.as_bytes());

        let po = BisacReader::<_, Po>::new(bytes.as_slice())
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(po.items[0].title, "Les Misérables");

        let strict = BisacReader::<_, Po>::new(bytes.as_slice())
            .with_encoding(TextEncoding::Utf8)
            .next()
            .unwrap();
        assert!(matches!(strict, Err(BisacError::EncodingError(_))));
    }
}
