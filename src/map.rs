//! Ordered map type for tueson records.
//!
//! This module provides [`Map`], a wrapper around [`IndexMap`] that keeps
//! record fields in insertion order. Field order is significant in tueson:
//! encoding a record replays its fields in the order they were inserted, and
//! decoding reproduces the order the keys appeared in the input.
//!
//! Keys are unique within a record. [`Map::insert`] reports a replaced value
//! the way `IndexMap` does; the decoder uses that to reject duplicate keys
//! instead of silently overwriting.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tueson::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("name".to_string(), Value::from("Ann"));
//! map.insert("age".to_string(), Value::from(3));
//!
//! let keys: Vec<_> = map.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::Value;

/// An insertion-ordered map of string keys to tueson values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key if
    /// one existed. An existing key keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for Map {
    fn from(map: HashMap<String, Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl From<Map> for HashMap<String, Value> {
    fn from(map: Map) -> Self {
        map.0.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}
