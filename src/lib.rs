//! Decoder for a lenient JSON-like dialect.
//!
//! The grammar is JSON with the edges filed off: commas, newlines, and
//! carriage returns are interchangeable filler inside containers, string
//! escapes copy the following character verbatim, and `null`/`true`/`false`
//! are recognized by their first character alone. Numbers are unsigned
//! integer literals and decode to `i64`.
//!
//! ```
//! use json_decoder::{Value, decode};
//!
//! let value = decode("[null [false, 1, \"one\"]]").unwrap();
//!
//! assert_eq!(
//!     value,
//!     Value::Array(vec![
//!         Value::Null,
//!         Value::Array(vec![
//!             Value::Boolean(false),
//!             Value::Integer(1),
//!             Value::String("one".into()),
//!         ]),
//!     ])
//! );
//! ```

mod decoder;
mod value;

pub use decoder::{DecodeError, DecodeErrorKind, Decoder};
pub use value::Value;

/// Decodes the first value in `input`, skipping leading spaces.
///
/// Anything after the first complete value is left unexamined. Malformed
/// input fails with a [`DecodeError`] carrying the offending byte offset;
/// no partial tree is ever returned.
pub fn decode(input: &str) -> Result<Value, DecodeError> {
    Decoder::new(input).decode()
}
