//! Recovery strategies for malformed BISAC input.
//!
//! BISAC files come from many producers and not all of them follow the layout
//! closely. Structural problems (a missing header or trailer, too few lines)
//! are always errors. Record-level problems, such as a sequence number that is
//! not a number or a title continuation with no line item before it, are
//! errors in [`RecoveryMode::Strict`] and are logged and skipped in
//! [`RecoveryMode::Lenient`].

use crate::error::{BisacError, Result};

/// Strategy for handling malformed records inside an otherwise valid message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryMode {
    /// Strict mode: return errors for any malformed record (default)
    #[default]
    Strict,
    /// Lenient mode: log the problem, use a default value or skip the record
    Lenient,
}

impl RecoveryMode {
    /// Try to recover from an error based on the recovery mode.
    ///
    /// # Errors
    ///
    /// Returns `error` in strict mode. In lenient mode the error is logged
    /// with `context` and `Ok(())` is returned.
    pub fn recover(self, error: BisacError, context: &str) -> Result<()> {
        match self {
            RecoveryMode::Strict => Err(error),
            RecoveryMode::Lenient => {
                tracing::warn!(%error, context, "recovered from malformed record");
                Ok(())
            },
        }
    }

    /// Unwrap a decoded value, substituting `T::default()` in lenient mode.
    ///
    /// # Errors
    ///
    /// Returns the decoding error in strict mode.
    pub fn or_default<T: Default>(self, value: Result<T>, context: &str) -> Result<T> {
        match value {
            Ok(v) => Ok(v),
            Err(error) => self.recover(error, context).map(|()| T::default()),
        }
    }
}
