//! tueson deserialization.
//!
//! Decoding runs in two stages. The indentation tree builder threads the
//! input lines into a tree (see `tree`), then the value parser walks that
//! tree top-down, dispatching on each node's content: a type keyword
//! (`null`, `yes`, `no`, `record`, `list`, `text`, `esctext`), a quoted
//! scalar beginning with `'`, or a number literal. The whole input decodes
//! in one shot, with no streaming mode and no partial result, and every
//! failure carries the 1-based line and column of the offending input.
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tueson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let doc = "record\n  x 1\n  y 2\n";
//! let data: Data = from_str(doc).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::grammar;
use crate::tree::{self, Node};
use crate::{Error, Map, Result, Value};
use serde::de::{Deserializer as _, IntoDeserializer};
use serde::{de, forward_to_deserialize_any};

/// Decodes a complete tueson document.
pub(crate) fn decode(input: &str) -> Result<Value> {
    let root = tree::build(input);
    let mut roots = root.children.iter().filter(|node| !node.is_blank());

    let first = match roots.next() {
        Some(node) => node,
        None => return Err(Error::syntax(1, 1, "no value found")),
    };
    if first.indent != 0 {
        return Err(Error::syntax(
            first.line,
            first.column(),
            "top-level value must not be indented",
        ));
    }
    if let Some(extra) = roots.next() {
        return Err(Error::syntax(
            extra.line,
            extra.column(),
            "multiple root values; expected end of input after the first",
        ));
    }
    node_value(first, first.text, first.column())
}

/// Parses one node as a value.
///
/// `content` is the node's text, or the remainder of the line when the
/// value sits inline after a record key; `column` is where `content`
/// starts. Container keywords consume the node's children.
fn node_value(node: &Node, content: &str, column: usize) -> Result<Value> {
    match content {
        "null" => Ok(Value::Null),
        "yes" => Ok(Value::Bool(true)),
        "no" => Ok(Value::Bool(false)),
        "record" => record_value(node),
        "list" => list_value(node),
        "text" => block_text(node, false),
        "esctext" => block_text(node, true),
        _ => {
            if let Some(rest) = content.strip_prefix('\'') {
                return Ok(Value::Text(grammar::unescape(rest, node.line, column + 1)?));
            }
            if grammar::is_number_literal(content) {
                return number_value(node, content, column);
            }
            Err(Error::syntax(
                node.line,
                column,
                format!("unrecognized value keyword `{}`", content),
            ))
        }
    }
}

fn number_value(node: &Node, content: &str, column: usize) -> Result<Value> {
    if let Some(child) = node.children.iter().find(|c| !c.is_blank()) {
        return Err(Error::syntax(
            child.line,
            child.column(),
            "number cannot have nested content",
        ));
    }
    match content.parse::<f64>() {
        // The literal grammar is a subset of what `f64` accepts, so the
        // parse only yields Err/infinity on exponent overflow.
        Ok(number) if number.is_finite() => Ok(Value::Number(number)),
        _ => Err(Error::syntax(
            node.line,
            column,
            format!("number `{}` is out of range", content),
        )),
    }
}

fn record_value(node: &Node) -> Result<Value> {
    let mut fields = Map::new();
    for entry in node.children.iter().filter(|c| !c.is_blank()) {
        if entry.indent != node.indent + 2 {
            return Err(Error::syntax(
                entry.line,
                entry.column(),
                "record entries must be indented exactly two spaces past their record",
            ));
        }
        let (key, value) = if let Some(raw_key) = entry.text.strip_prefix('@') {
            let key = grammar::unescape(raw_key, entry.line, entry.column() + 1)?;
            (key, escaped_key_value(entry)?)
        } else {
            plain_entry(entry)?
        };
        if fields.contains_key(&key) {
            return Err(Error::syntax(
                entry.line,
                entry.column(),
                format!("duplicate record key `{}`", key),
            ));
        }
        fields.insert(key, value);
    }
    Ok(Value::Record(fields))
}

/// The value of an `@`-escaped key: the key line's single non-blank child.
fn escaped_key_value(entry: &Node) -> Result<Value> {
    let mut carriers = entry.children.iter().filter(|c| !c.is_blank());
    let value_node = match carriers.next() {
        Some(node) => node,
        None => {
            return Err(Error::syntax(
                entry.line,
                entry.column(),
                "escaped key has no value",
            ))
        }
    };
    if let Some(extra) = carriers.next() {
        return Err(Error::syntax(
            extra.line,
            extra.column(),
            "escaped key has more than one value",
        ));
    }
    if value_node.indent != entry.indent + 2 {
        return Err(Error::syntax(
            value_node.line,
            value_node.column(),
            "escaped key's value must be indented exactly two spaces past the key",
        ));
    }
    node_value(value_node, value_node.text, value_node.column())
}

/// A record entry without `@`: identifier key, one space, inline value.
fn plain_entry(entry: &Node) -> Result<(String, Value)> {
    match entry.text.split_once(' ') {
        Some((key, rest)) => {
            if !grammar::is_plain_key(key) {
                return Err(Error::syntax(
                    entry.line,
                    entry.column(),
                    format!("record key `{}` must use `@` escaping", key),
                ));
            }
            let value = node_value(entry, rest, entry.column() + key.len() + 1)?;
            Ok((key.to_string(), value))
        }
        None => Err(Error::syntax(
            entry.line,
            entry.column(),
            "expected a space between record key and value",
        )),
    }
}

/// A `text` or `esctext` block: every descendant line contributes one line
/// of the string, minus the trailing blank run that terminates the block.
fn block_text(node: &Node, escaped: bool) -> Result<Value> {
    let mut body = Vec::new();
    collect_descendants(node, &mut body);
    while body.last().map_or(false, |n| n.is_blank()) {
        body.pop();
    }

    let base = node.indent + 2;
    let mut lines = Vec::with_capacity(body.len());
    for line_node in body {
        if line_node.is_blank() {
            lines.push(String::new());
            continue;
        }
        if line_node.indent < base {
            return Err(Error::syntax(
                line_node.line,
                line_node.column(),
                "text lines must be indented at least two spaces past their block",
            ));
        }
        // Indentation beyond the base is content: reconstruct it as
        // leading spaces.
        let mut line = " ".repeat(line_node.indent - base);
        if escaped {
            line.push_str(&grammar::unescape(
                line_node.text,
                line_node.line,
                line_node.column(),
            )?);
        } else {
            line.push_str(line_node.text);
        }
        lines.push(line);
    }
    Ok(Value::Text(lines.join("\n")))
}

fn collect_descendants<'t, 'a>(node: &'t Node<'a>, out: &mut Vec<&'t Node<'a>>) {
    for child in &node.children {
        out.push(child);
        collect_descendants(child, out);
    }
}

/// The tueson deserializer.
///
/// Parses a tueson document into any type implementing `Deserialize`.
/// Created via [`Deserializer::from_str`].
pub struct Deserializer<'de> {
    input: &'de str,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer { input }
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(decode(self.input)?).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match decode(self.input)? {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(decode(self.input)?).deserialize_enum(name, variants, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

/// Drives a visitor from an already-decoded [`Value`].
struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => {
                // Integral numbers visit as i64 so derived integer fields
                // accept them.
                if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    visitor.visit_i64(n as i64)
                } else {
                    visitor.visit_f64(n)
                }
            }
            Value::Text(s) => visitor.visit_string(s),
            Value::List(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Record(fields) => visitor.visit_map(MapDeserializer::new(fields)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(ValueDeserializer::new(value)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Text(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Record(fields) => {
                let mut entries = fields.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, value)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::Message(
                        "expected a record with exactly one key for an enum variant".to_string(),
                    )),
                }
            }
            _ => Err(Error::Message("expected enum".to_string())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(items: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(fields: Map) -> Self {
        MapDeserializer {
            iter: fields.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::Text(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::Message(
                "next_value_seed called before next_key_seed".to_string(),
            )),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::Text(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::Message("expected unit variant".to_string())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::Message("expected newtype variant".to_string())),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::List(items)) => visitor.visit_seq(SeqDeserializer::new(items)),
            _ => Err(Error::Message("expected tuple variant".to_string())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Record(fields)) => visitor.visit_map(MapDeserializer::new(fields)),
            _ => Err(Error::Message("expected struct variant".to_string())),
        }
    }
}
