//! tueson serialization.
//!
//! The encoder walks a [`Value`] top-down and produces indented text: one
//! line per emitted node, children indented two spaces past their parent.
//! Encoding is total over the data model and needs no tree; the only
//! rejected input is a non-finite number, which the format cannot carry.
//!
//! Strings pick the cheapest of three spellings. A single line becomes a
//! quoted scalar (`'` prefix, backslash escapes). Multi-line strings become
//! a `text` block when every line is safe to emit verbatim, otherwise an
//! `esctext` block with each line escaped. A run of trailing newlines rides
//! on the last line of the split so it survives the round trip instead of
//! being swallowed as block-terminating blanks.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tueson::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let doc = to_string(&Data { x: 1, y: 2 }).unwrap();
//! assert_eq!(doc, "record\n  x 1\n  y 2\n");
//! ```

use crate::{grammar, Error, Map, Result, Value};
use serde::{ser, Serialize};

/// Renders a [`Value`] as a tueson document.
pub(crate) fn encode(value: &Value) -> Result<String> {
    let mut out = String::with_capacity(256);
    emit(value, "", &mut out)?;
    Ok(out)
}

/// Writes one value at the current position; `indent` is the indentation of
/// the line this value starts on.
fn emit(value: &Value, indent: &str, out: &mut String) -> Result<()> {
    match value {
        Value::Null => out.push_str("null\n"),
        Value::Bool(true) => out.push_str("yes\n"),
        Value::Bool(false) => out.push_str("no\n"),
        Value::Number(number) => {
            if !number.is_finite() {
                return Err(Error::unsupported_type(
                    "non-finite numbers cannot be encoded",
                ));
            }
            out.push_str(&number.to_string());
            out.push('\n');
        }
        Value::Text(text) => emit_text(text, indent, out),
        Value::List(items) => {
            out.push_str("list\n");
            let deeper = format!("{}  ", indent);
            for item in items {
                out.push_str(&deeper);
                emit(item, &deeper, out)?;
            }
        }
        Value::Record(fields) => {
            out.push_str("record\n");
            let deeper = format!("{}  ", indent);
            for (key, field) in fields.iter() {
                out.push_str(&deeper);
                if grammar::is_plain_key(key) {
                    out.push_str(key);
                    out.push(' ');
                    emit(field, &deeper, out)?;
                } else {
                    out.push('@');
                    out.push_str(&grammar::escape(key));
                    out.push('\n');
                    let deepest = format!("{}  ", deeper);
                    out.push_str(&deepest);
                    emit(field, &deepest, out)?;
                }
            }
        }
    }
    Ok(())
}

fn emit_text(text: &str, indent: &str, out: &mut String) {
    let body = text.trim_end_matches('\n');
    let mut lines: Vec<&str> = body.split('\n').collect();
    if body.len() < text.len() {
        // Re-attach the trailing newline run to the last line; the escapes
        // keep it, where a bare block would drop it as terminating blanks.
        if let Some(last) = lines.last_mut() {
            *last = &text[body.len() - last.len()..];
        }
    }

    if lines.len() == 1 {
        out.push('\'');
        out.push_str(&grammar::escape(lines[0]));
        out.push('\n');
        return;
    }

    let escaped = lines.iter().any(|line| grammar::needs_escape(line));
    out.push_str(if escaped { "esctext\n" } else { "text\n" });
    for line in lines {
        // Empty lines carry no indentation; the decoder reads them back as
        // empty regardless.
        if line.is_empty() {
            out.push('\n');
            continue;
        }
        out.push_str(indent);
        out.push_str("  ");
        if escaped {
            out.push_str(&grammar::escape(line));
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
}

/// Serializes any `T: Serialize` into a [`Value`].
///
/// This is the bridge between arbitrary Rust data and the tueson data
/// model; [`crate::to_value`] and [`crate::to_string`] are built on it.
/// Out-of-domain data (non-finite floats, maps with non-text keys) is
/// rejected here, before any encoding happens.
pub struct ValueSerializer;

pub struct SerializeVec {
    items: Vec<Value>,
}

pub struct SerializeMap {
    fields: Map,
    current_key: Option<String>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    items: Vec<Value>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    fields: Map,
}

fn value_of<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        if v.is_finite() {
            Ok(Value::Number(v))
        } else {
            Err(Error::unsupported_type(
                "non-finite numbers cannot be encoded",
            ))
        }
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let items = v.iter().map(|&b| Value::Number(b as f64)).collect();
        Ok(Value::List(items))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Text(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut fields = Map::with_capacity(1);
        fields.insert(variant.to_string(), value_of(value)?);
        Ok(Value::Record(fields))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            fields: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            fields: Map::new(),
            current_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            fields: Map::new(),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.items))
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut fields = Map::with_capacity(1);
        fields.insert(self.variant.to_string(), Value::List(self.items));
        Ok(Value::Record(fields))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value_of(key)? {
            Value::Text(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::unsupported_type("record keys must be text")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::Message("serialize_value called without serialize_key".into()))?;
        self.fields.insert(key, value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.fields))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.insert(key.to_string(), value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Record(self.fields))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.fields.insert(key.to_string(), value_of(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut fields = Map::with_capacity(1);
        fields.insert(self.variant.to_string(), Value::Record(self.fields));
        Ok(Value::Record(fields))
    }
}
