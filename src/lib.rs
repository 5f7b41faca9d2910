//! # serde_tueson
//!
//! A Serde-compatible codec for tueson, a lossless, indentation-structured
//! text serialization format.
//!
//! ## What is tueson?
//!
//! tueson spells out a restricted JSON-like data model (null, booleans,
//! numbers, text, lists, and records) as plain indented lines. Every value
//! starts with a type keyword or literal, children are indented two spaces
//! past their parent, and strings with embedded newlines are written as
//! multi-line blocks. The encoding is lossless: whatever survives the data
//! model survives the round trip, including trailing newlines inside
//! strings and record key order.
//!
//! ```text
//! record
//!   name 'Ann
//!   tags list
//!     'x
//!     'y
//!   age 3
//! ```
//!
//! ## Key Features
//!
//! - **Lossless**: `decode(encode(v)) == v` for every value in the data
//!   model, and `encode` output is canonical (encoding is idempotent over a
//!   decode)
//! - **Line-oriented**: no braces or brackets to balance; structure is
//!   indentation, one value per line
//! - **Serde Compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **Positioned errors**: every decode failure reports a 1-based line and
//!   column
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_tueson = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_tueson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User {
//!     id: 123,
//!     name: "Alice".to_string(),
//!     active: true,
//! };
//!
//! let doc = to_string(&user).unwrap();
//! assert_eq!(doc, "record\n  id 123\n  name 'Alice\n  active yes\n");
//!
//! let user_back: User = from_str(&doc).unwrap();
//! assert_eq!(user, user_back);
//! ```
//!
//! ### Dynamic Values with the tueson! Macro
//!
//! ```rust
//! use serde_tueson::{tueson, Value};
//!
//! let data = tueson!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Record(fields) = data {
//!     assert_eq!(fields.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Error Reporting
//!
//! ```rust
//! use serde_tueson::{from_str, Value};
//!
//! // Children of a record must be indented exactly two spaces.
//! let err = from_str::<Value>("record\n    name 'Ann\n").unwrap_err();
//! let position = err.position().unwrap();
//! assert_eq!((position.line, position.column), (2, 5));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - Proper error propagation with `Result` types

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod ser;
pub mod value;

mod grammar;
mod tree;

pub use de::Deserializer;
pub use error::{Error, Position, Result};
pub use map::Map;
pub use ser::ValueSerializer;
pub use value::Value;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a tueson string.
///
/// The output is canonical: one line per node, two-space indentation, and a
/// trailing newline.
///
/// # Examples
///
/// ```rust
/// use serde_tueson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let doc = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(doc, "record\n  x 1\n  y 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value falls outside the tueson data model
/// (non-finite numbers, maps with non-text keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    ser::encode(&to_value(value)?)
}

/// Serialize any `T: Serialize` to a writer in tueson format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let doc = to_string(value)?;
    writer
        .write_all(doc.as_bytes())
        .map_err(|e| Error::io(e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// Useful for working with tueson data dynamically when the structure isn't
/// known at compile time.
///
/// # Examples
///
/// ```rust
/// use serde_tueson::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_record());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented in the data model.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Deserialize an instance of type `T` from a string of tueson text.
///
/// # Examples
///
/// ```rust
/// use serde_tueson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("record\n  x 1\n  y 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid tueson or cannot be
/// deserialized to type `T`. Syntax errors carry the offending line and
/// column.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    let mut deserializer = Deserializer::from_str(s);
    T::deserialize(&mut deserializer)
}

/// Deserialize an instance of type `T` from bytes of tueson text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid tueson, or
/// cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::Message(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of tueson text.
///
/// The entire input is read before decoding begins; there is no incremental
/// mode.
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid tueson, or the
/// data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(&string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    #[test]
    fn roundtrip_point() {
        let point = Point { x: 1, y: -2 };
        let doc = to_string(&point).unwrap();
        let point_back: Point = from_str(&doc).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn roundtrip_user() {
        let user = User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        };

        let doc = to_string(&user).unwrap();
        let user_back: User = from_str(&doc).unwrap();
        assert_eq!(user, user_back);
    }

    #[test]
    fn to_value_builds_records() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        match value {
            Value::Record(fields) => {
                assert_eq!(fields.get("x"), Some(&Value::Number(1.0)));
                assert_eq!(fields.get("y"), Some(&Value::Number(2.0)));
            }
            _ => panic!("Expected record"),
        }
    }

    #[test]
    fn roundtrip_vec() {
        let numbers = vec![1, 2, 3, 4, 5];
        let doc = to_string(&numbers).unwrap();
        let numbers_back: Vec<i32> = from_str(&doc).unwrap();
        assert_eq!(numbers, numbers_back);
    }

    #[test]
    fn writer_and_slice() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &Point { x: 3, y: 4 }).unwrap();
        let back: Point = from_slice(&buffer).unwrap();
        assert_eq!(back, Point { x: 3, y: 4 });
    }

    #[test]
    fn reader() {
        let doc = to_string(&Point { x: 9, y: 10 }).unwrap();
        let cursor = std::io::Cursor::new(doc.into_bytes());
        let back: Point = from_reader(cursor).unwrap();
        assert_eq!(back, Point { x: 9, y: 10 });
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(to_string(&f64::NAN).is_err());
        assert!(to_value(&f64::INFINITY).is_err());
    }
}
