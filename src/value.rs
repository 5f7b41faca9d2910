//! Dynamic value representation for tueson data.
//!
//! This module provides the [`Value`] enum, the in-memory form of any tueson
//! document: null, booleans, numbers, text, lists, and records. It is the
//! domain of the encoder and the image of the decoder, and the type to reach
//! for when the structure of a document isn't known at compile time.
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_tueson::{tueson, Value};
//!
//! // From primitives
//! let null = Value::Null;
//! let flag = Value::from(true);
//! let count = Value::from(42);
//! let name = Value::from("Ann");
//!
//! // Using the tueson! macro
//! let doc = tueson!({
//!     "name": "Ann",
//!     "age": 3
//! });
//! assert!(doc.is_record());
//! ```
//!
//! ## Parsing and rendering
//!
//! ```rust
//! use serde_tueson::Value;
//!
//! let value: Value = "record\n  name 'Ann\n".parse().unwrap();
//! assert_eq!(
//!     value.as_record().and_then(|r| r.get("name")).and_then(|v| v.as_str()),
//!     Some("Ann"),
//! );
//! ```

use crate::{Error, Map};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Any tueson value.
///
/// The variants mirror the format's grammar exactly: `null`, `yes`/`no`,
/// number literals, quoted or block text, `list`, and `record`. Numbers are
/// finite `f64`s; a non-finite number is outside the data model and the
/// encoder refuses it. Record fields keep their insertion order, and keys
/// are unique within a record.
///
/// # Examples
///
/// ```rust
/// use serde_tueson::Value;
///
/// let num = Value::Number(42.0);
/// let text = Value::Text("hello".to_string());
///
/// assert!(num.is_number());
/// assert_eq!(text.as_str(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Record(Map),
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a record.
    #[inline]
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a number, returns it as an `f64`. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// If the value is a whole number in `i64` range, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tueson::Value;
    ///
    /// assert_eq!(Value::Number(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Number(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    Some(*n as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// If the value is text, returns a reference to it. Otherwise returns
    /// `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to its elements.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a record, returns a reference to its fields.
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Map> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Parses a tueson document.
///
/// Equivalent to calling [`crate::from_str`] with a `Value` target.
impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        crate::de::decode(s)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                // Whole numbers travel as integers so JSON bridges print
                // `3`, not `3.0`.
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n <= i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::Text(s) => serializer.serialize_str(s),
            Value::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any tueson value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(Value::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Number(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::Text(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut fields = Map::new();
                while let Some((key, value)) = map.next_entry()? {
                    fields.insert(key, value);
                }
                Ok(Value::Record(fields))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n),
            _ => Err(Error::Message(format!("expected number, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(Error::Message(format!("expected bool, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Text(s) => Ok(s),
            _ => Err(Error::Message(format!("expected text, found {:?}", value))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Record(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Number(42.0));
        assert_eq!(Value::from(3.5f64), Value::Number(3.5));
        assert_eq!(Value::from("test"), Value::Text("test".to_string()));
    }

    #[test]
    fn from_collections() {
        let items = vec![Value::from(1i32), Value::from(2i32)];
        assert_eq!(Value::from(items.clone()), Value::List(items));

        let mut fields = Map::new();
        fields.insert("key".to_string(), Value::from(42i32));
        assert_eq!(Value::from(fields.clone()), Value::Record(fields));
    }

    #[test]
    fn tryfrom_extraction() {
        assert_eq!(f64::try_from(Value::Number(3.5)).unwrap(), 3.5);
        assert!(bool::try_from(Value::Number(1.0)).is_err());
        assert_eq!(
            String::try_from(Value::Text("hello".to_string())).unwrap(),
            "hello"
        );
    }

    #[test]
    fn as_i64_whole_numbers_only() {
        assert_eq!(Value::Number(42.0).as_i64(), Some(42));
        assert_eq!(Value::Number(-1.0).as_i64(), Some(-1));
        assert_eq!(Value::Number(42.5).as_i64(), None);
        assert_eq!(Value::Text("42".to_string()).as_i64(), None);
    }

    #[test]
    fn accessors() {
        let value = Value::List(vec![Value::Null]);
        assert!(value.is_list());
        assert!(!value.is_record());
        assert_eq!(value.as_list().map(Vec::len), Some(1));
        assert_eq!(value.as_record(), None);
    }

    #[test]
    fn parse_via_fromstr() {
        let value: Value = "list\n  'a\n  no\n".parse().unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Text("a".to_string()), Value::Bool(false)])
        );
    }
}
