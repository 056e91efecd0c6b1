//! Error types for BISAC operations.
//!
//! This module provides the [`BisacError`] type for all library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all BISAC library operations.
///
/// Structural problems with a file (too few lines, a missing header or
/// trailer, an unreadable mandatory number) are reported as
/// [`BisacError::InvalidFile`]. Values rejected by a validating setter or
/// constructor are reported as [`BisacError::InvalidArgument`].
#[derive(Error, Debug)]
pub enum BisacError {
    /// The input does not have the structure of a BISAC message.
    #[error("Invalid BISAC file: {0}")]
    InvalidFile(String),

    /// A caller supplied a value that cannot be stored or used.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input bytes could not be decoded with the requested character encoding.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`BisacError`].
pub type Result<T> = std::result::Result<T, BisacError>;
