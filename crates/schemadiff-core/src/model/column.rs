//! Column schema types.
//!
//! A [`ColumnMap`] is an insertion-ordered map (`IndexMap`) from column name
//! to an optional [`ColumnSchema`]. Order is the schema's declared column
//! order and is never derived from hashing. A `None` value means the column is not
//! present on that side even though its name is listed.

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Declared definition of a single column on one side of a diff.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Declared type string (e.g. `INT`, `VARCHAR`)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<String>,
}

impl ColumnSchema {
    /// Create a column with a declared type
    pub fn typed(column_type: impl Into<String>) -> Self {
        Self {
            column_type: Some(column_type.into()),
        }
    }

    /// Create a column with no declared type
    pub fn untyped() -> Self {
        Self { column_type: None }
    }
}

/// Ordered mapping of column name to its definition.
///
/// Equality is order-sensitive: two maps listing the same columns in a
/// different order are different schemas.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: IndexMap<String, Option<ColumnSchema>>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert or replace a column.
    ///
    /// Replacing an existing name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, column: Option<ColumnSchema>) {
        self.entries.insert(name.into(), column);
    }

    /// Builder form of [`insert`](Self::insert) for a typed column
    pub fn with_column(mut self, name: impl Into<String>, column_type: impl Into<String>) -> Self {
        self.insert(name, Some(ColumnSchema::typed(column_type)));
        self
    }

    /// Builder form of [`insert`](Self::insert) for a listed-but-absent column
    pub fn with_absent(mut self, name: impl Into<String>) -> Self {
        self.insert(name, None);
        self
    }

    /// Look up a column; `None` if the name is unlisted or listed as absent
    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// True if the name is listed, regardless of whether it is present
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All listed names in order, including absent ones
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// All entries in order, including absent ones
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ColumnSchema>)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_ref()))
    }

    /// Present (non-null) columns in order
    pub fn present(&self) -> impl Iterator<Item = (&str, &ColumnSchema)> {
        self.entries
            .iter()
            .filter_map(|(n, c)| c.as_ref().map(|c| (n.as_str(), c)))
    }

    /// Number of listed names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of present (non-null) columns
    pub fn present_len(&self) -> usize {
        self.entries.values().filter(|c| c.is_some()).count()
    }
}

impl PartialEq for ColumnMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for ColumnMap {}

impl<K: Into<String>> FromIterator<(K, Option<ColumnSchema>)> for ColumnMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<ColumnSchema>)>>(iter: I) -> Self {
        let mut map = ColumnMap::new();
        for (name, column) in iter {
            map.insert(name, column);
        }
        map
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, column) in &self.entries {
            map.serialize_entry(name, column)?;
        }
        map.end()
    }
}

struct ColumnMapVisitor;

impl<'de> Visitor<'de> for ColumnMapVisitor {
    type Value = ColumnMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping column names to {\"type\": ...} or null")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = ColumnMap {
            entries: IndexMap::with_capacity(access.size_hint().unwrap_or(0).min(4096)),
        };
        while let Some((name, column)) = access.next_entry::<String, Option<ColumnSchema>>()? {
            map.insert(name, column);
        }
        Ok(map)
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(ColumnMap::new())
    }
}

impl<'de> Deserialize<'de> for ColumnMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // `deserialize_any` so that a JSON `null` becomes an empty map.
        deserializer.deserialize_any(ColumnMapVisitor)
    }
}
