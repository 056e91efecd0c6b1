//! Macros for code generation in BISAC message types.
//!
//! Every message kind offers the same family of entry points (parse a string,
//! a reader or a file, load only the first message, export as JSON). This
//! module provides a macro that generates them inside the message's impl
//! block so the three kinds stay in step.

/// Generate the parsing and loading entry points for a message type.
///
/// Used inside the impl block of a type implementing
/// [`BisacMessage`](crate::BisacMessage). Generates:
/// - `parse_str()` - lazy iterator over the messages in a string
/// - `parse_reader()` - lazy iterator over the messages in any `BufRead`
/// - `parse_file()` - lazy iterator over the messages in a file
/// - `load_from_str()` / `load_from_file()` - the first message only
/// - `to_json()` - the message as a JSON value
///
/// # Example
///
/// ```ignore
/// impl Po {
///     define_message_parsers!("purchase order");
/// }
/// ```
#[macro_export]
macro_rules! define_message_parsers {
    ($description:literal) => {
        #[doc = concat!("Iterate over every ", $description, " in `input`.")]
        ///
        /// Messages are assembled lazily; the iterator yields an error for a
        /// malformed message and then stops.
        #[must_use]
        pub fn parse_str(input: &str) -> $crate::BisacReader<&[u8], Self> {
            $crate::BisacReader::new(input.as_bytes())
        }

        #[doc = concat!("Iterate over every ", $description, " read from `reader`.")]
        pub fn parse_reader<R: std::io::BufRead>(reader: R) -> $crate::BisacReader<R, Self> {
            $crate::BisacReader::new(reader)
        }

        #[doc = concat!("Iterate over every ", $description, " in the file at `path`.")]
        ///
        /// The file stays open until the returned reader is dropped.
        ///
        /// # Errors
        ///
        /// Returns [`BisacError::InvalidArgument`](crate::BisacError::InvalidArgument)
        /// if `path` is not an existing regular file, or an I/O error if it
        /// cannot be opened.
        pub fn parse_file<P: AsRef<std::path::Path>>(
            path: P,
        ) -> $crate::Result<$crate::BisacReader<std::io::BufReader<std::fs::File>, Self>> {
            let path = path.as_ref();
            if !path.is_file() {
                return Err($crate::BisacError::InvalidArgument(format!(
                    "Invalid file: {}",
                    path.display()
                )));
            }
            let file = std::fs::File::open(path)?;
            Ok($crate::BisacReader::new(std::io::BufReader::new(file)))
        }

        #[doc = concat!("Load the first ", $description, " in `input`.")]
        ///
        /// Any further messages are ignored with a warning; use
        /// [`parse_str`](Self::parse_str) to read them all.
        ///
        /// # Errors
        ///
        /// Returns an error if the first message is malformed.
        pub fn load_from_str(input: &str) -> $crate::Result<Option<Self>> {
            Self::load_first(Self::parse_str(input))
        }

        #[doc = concat!("Load the first ", $description, " in the file at `path`.")]
        ///
        /// # Errors
        ///
        /// Returns an error if the path is not a file, cannot be read, or the
        /// first message is malformed.
        pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> $crate::Result<Option<Self>> {
            Self::load_first(Self::parse_file(path)?)
        }

        fn load_first<R: std::io::BufRead>(
            mut reader: $crate::BisacReader<R, Self>,
        ) -> $crate::Result<Option<Self>> {
            let first = reader.read_message()?;
            if first.is_some() && reader.read_message().ok().flatten().is_some() {
                tracing::warn!(
                    kind = <Self as $crate::BisacMessage>::NAME,
                    "input holds more than one message; only the first was loaded"
                );
            }
            Ok(first)
        }

        /// The message as a JSON value.
        ///
        /// # Errors
        ///
        /// Returns [`BisacError::InvalidArgument`](crate::BisacError::InvalidArgument)
        /// if the message cannot be represented as JSON.
        pub fn to_json(&self) -> $crate::Result<serde_json::Value> {
            serde_json::to_value(self).map_err(|e| {
                $crate::BisacError::InvalidArgument(format!("JSON conversion failed: {e}"))
            })
        }
    };
}
