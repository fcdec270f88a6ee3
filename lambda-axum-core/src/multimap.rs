//! Ordered, case-insensitive multi-value maps.
//!
//! Gateway payloads carry headers and query parameters in two shapes: a plain
//! object (`"headers": {"Accept": "text/html"}`) and a multi-value object
//! (`"multiValueHeaders": {"Accept": ["text/html", "text/plain"]}`).
//! [`MultiMap`] deserializes from either shape and is used for all four
//! fields, so single-value data is simply a map whose entries each hold one
//! value.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

/// An ordered mapping from a case-insensitive key to one or more values.
///
/// Entry order follows the order keys appeared in the source document.
/// Lookups compare keys ASCII case-insensitively, matching HTTP header
/// semantics; the original spelling of each key is preserved for iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiMap {
    entries: Vec<(String, Vec<String>)>,
}

impl MultiMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// All values for `key`, compared case-insensitively.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, vs)| vs.as_slice())
    }

    /// The first value for `key`, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|vs| vs.first()).map(String::as_str)
    }

    /// Whether `key` is present (case-insensitive).
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append one value to `key`, creating the entry if absent.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some((_, vs)) => vs.push(value.into()),
            None => self.entries.push((key, vec![value.into()])),
        }
    }

    /// Replace all values for `key`.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        let key = key.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some((_, vs)) => *vs = values,
            None => self.entries.push((key, values)),
        }
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, vs)| (k.as_str(), vs.as_slice()))
    }

    /// Iterate keys in insertion order, original spelling.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MultiMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MultiMap::new();
        for (k, v) in iter {
            map.append(k, v);
        }
        map
    }
}

/// A JSON object value that is either a bare string or an array of strings.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for MultiMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MultiMapVisitor;

        impl<'de> Visitor<'de> for MultiMapVisitor {
            type Value = MultiMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of strings to strings or string lists")
            }

            fn visit_unit<E>(self) -> Result<MultiMap, E> {
                // Payloads serialize absent maps as `null`.
                Ok(MultiMap::new())
            }

            fn visit_map<A>(self, mut access: A) -> Result<MultiMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = MultiMap::new();
                while let Some((key, value)) = access.next_entry::<String, OneOrMany>()? {
                    let values = match value {
                        OneOrMany::One(v) => vec![v],
                        OneOrMany::Many(vs) => vs,
                    };
                    // Keys differing only in case merge into one entry, the
                    // same grouping `append` applies.
                    match map
                        .entries
                        .iter_mut()
                        .find(|(k, _)| k.eq_ignore_ascii_case(&key))
                    {
                        Some((_, vs)) => vs.extend(values),
                        None => map.entries.push((key, values)),
                    }
                }
                Ok(map)
            }
        }

        deserializer.deserialize_any(MultiMapVisitor)
    }
}
