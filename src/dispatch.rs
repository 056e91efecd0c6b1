//! Record dispatch: turning a run of lines into one message.
//!
//! Each message kind implements [`BisacMessage`]. [`build_message`] checks the
//! structural frame of a run of lines (enough lines, a header first, a
//! trailer last), then classifies every line by its marker and hands it to
//! [`BisacMessage::apply`], which decodes the record and updates the message
//! in progress. Lines whose marker the kind does not model are skipped.

use crate::error::{BisacError, Result};
use crate::record_type::RecordKind;
use crate::recovery::RecoveryMode;

/// Minimum number of lines in a message: header, one detail, trailer.
pub const MIN_MESSAGE_LINES: usize = 3;

/// A BISAC message kind: title file, purchase order or acknowledgement.
pub trait BisacMessage: Sized + Default {
    /// The closed set of record types for this kind.
    type Record: RecordKind;

    /// Short name used in log output.
    const NAME: &'static str;

    /// Decode one classified line into the message in progress.
    ///
    /// Header records populate header fields, detail records append to (or
    /// enrich the last of) the item list, and control/trailer records are
    /// checked against the assembled items.
    ///
    /// # Errors
    ///
    /// Returns [`BisacError::InvalidFile`] for a malformed record when `mode`
    /// is strict.
    fn apply(&mut self, record: Self::Record, line: &str, mode: RecoveryMode) -> Result<()>;

    /// Render the message in its positional wire form, one record per line,
    /// without a trailing newline.
    fn to_bisac(&self) -> String;
}

/// Build one message from the lines between a header and its trailer.
///
/// `first_line` is the 1-based position of `lines[0]` in the source and is
/// only used in error messages.
///
/// # Errors
///
/// Returns [`BisacError::InvalidFile`] when there are fewer than three lines,
/// when the first line is not a header, when the last line is not a trailer,
/// or when a record fails to decode in strict mode. No partial message is
/// returned.
pub fn build_message<M: BisacMessage, S: AsRef<str>>(
    lines: &[S],
    mode: RecoveryMode,
    first_line: usize,
) -> Result<M> {
    if lines.len() < MIN_MESSAGE_LINES {
        return Err(BisacError::InvalidFile(
            "File appears to be too short".to_string(),
        ));
    }
    if !M::Record::is_header(lines[0].as_ref()) {
        return Err(BisacError::InvalidFile(
            "Missing header information".to_string(),
        ));
    }
    if !lines
        .last()
        .is_some_and(|line| M::Record::is_footer(line.as_ref()))
    {
        return Err(BisacError::InvalidFile(
            "Missing footer information".to_string(),
        ));
    }

    let mut message = M::default();
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        match M::Record::classify(line) {
            Some(record) => message
                .apply(record, line, mode)
                .map_err(|e| at_line(e, first_line + index))?,
            None => tracing::trace!(
                line = first_line + index,
                kind = M::NAME,
                "ignoring unrecognised record"
            ),
        }
    }

    Ok(message)
}

fn at_line(error: BisacError, line: usize) -> BisacError {
    match error {
        BisacError::InvalidFile(reason) => {
            BisacError::InvalidFile(format!("line {line}: {reason}"))
        },
        other => other,
    }
}

/// Log a control total that disagrees with the assembled message.
///
/// Totals are recomputed on output, so a mismatch is reported but not fatal.
pub(crate) fn check_total(kind: &str, what: &str, declared: u64, actual: u64) {
    if declared != actual {
        tracing::warn!(kind, what, declared, actual, "control total does not match content");
    }
}
