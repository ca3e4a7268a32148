//! Insertion-ordered table of rows
//!
//! A `Table` keeps rows addressable by string identifier while preserving
//! the order they were inserted in. Iteration and pagination always run
//! oldest to newest. Snapshots serialize a table as an ordered array of
//! `{id, value}` pairs, which is also the wire shape it deserializes from.

use std::collections::HashMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One row entry: identifier plus opaque row value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    id: String,
    value: Value,
}

/// Ordered associative container mapping row identifiers to opaque rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// id -> position in `entries`
    index: HashMap<String, usize>,

    /// Rows in insertion order
    entries: Vec<Entry>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if a row identifier is present
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a row by identifier
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.index.get(id).map(|&pos| &self.entries[pos].value)
    }

    /// Append a row at the end of iteration order
    ///
    /// Returns `false` without modifying the table if the identifier is
    /// already present.
    pub fn insert(&mut self, id: &str, value: Value) -> bool {
        if self.index.contains_key(id) {
            return false;
        }

        self.index.insert(id.to_string(), self.entries.len());
        self.entries.push(Entry {
            id: id.to_string(),
            value,
        });

        true
    }

    /// Replace a row in place, preserving its position
    ///
    /// Returns `false` if the identifier is absent.
    pub fn replace(&mut self, id: &str, value: Value) -> bool {
        match self.index.get(id) {
            Some(&pos) => {
                self.entries[pos].value = value;
                true
            }
            None => false,
        }
    }

    /// Remove a row by identifier, returning its value if it was present
    pub fn remove(&mut self, id: &str) -> Option<Value> {
        let pos = self.index.remove(id)?;
        let entry = self.entries.remove(pos);

        // Positions after the removed entry shift down by one
        for idx in self.index.values_mut() {
            if *idx > pos {
                *idx -= 1;
            }
        }

        Some(entry.value)
    }

    /// Iterate rows from oldest to newest insertion
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|e| (e.id.as_str(), &e.value))
    }

    /// Collect up to `limit` row values starting at position `offset`
    ///
    /// Out-of-range offsets and `limit == 0` yield an empty vec.
    pub fn page(&self, offset: usize, limit: usize) -> Vec<Value> {
        self.entries
            .iter()
            .skip(offset)
            .take(limit)
            .map(|e| e.value.clone())
            .collect()
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;

        let mut table = Table::new();
        for entry in entries {
            if !table.insert(&entry.id, entry.value) {
                return Err(D::Error::custom(format!(
                    "duplicate row id in table: {}",
                    entry.id
                )));
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_preserves_order() {
        let mut table = Table::new();

        assert!(table.insert("3", json!("c")));
        assert!(table.insert("1", json!("a")));
        assert!(table.insert("2", json!("b")));

        let ids: Vec<_> = table.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut table = Table::new();

        assert!(table.insert("1", json!("a")));
        assert!(!table.insert("1", json!("b")));

        assert_eq!(table.get("1"), Some(&json!("a")));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut table = Table::new();
        table.insert("1", json!("a"));
        table.insert("2", json!("b"));
        table.insert("3", json!("c"));

        assert!(table.replace("2", json!("B")));

        let values: Vec<_> = table.iter().map(|(_, v)| v.clone()).collect();
        assert_eq!(values, vec![json!("a"), json!("B"), json!("c")]);
    }

    #[test]
    fn test_replace_missing() {
        let mut table = Table::new();
        assert!(!table.replace("1", json!("a")));
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut table = Table::new();
        table.insert("1", json!("a"));
        table.insert("2", json!("b"));
        table.insert("3", json!("c"));

        assert_eq!(table.remove("2"), Some(json!("b")));
        assert_eq!(table.remove("2"), None);

        assert_eq!(table.get("3"), Some(&json!("c")));
        let ids: Vec<_> = table.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_page_bounds() {
        let mut table = Table::new();
        for i in 1..=5 {
            table.insert(&i.to_string(), json!(i));
        }

        assert_eq!(table.page(0, 2), vec![json!(1), json!(2)]);
        assert_eq!(table.page(3, 10), vec![json!(4), json!(5)]);
        assert_eq!(table.page(5, 10), Vec::<Value>::new());
        assert_eq!(table.page(0, 0), Vec::<Value>::new());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut table = Table::new();
        table.insert("2", json!({"name": "b"}));
        table.insert("1", json!({"name": "a"}));

        let text = serde_json::to_string(&table).unwrap();
        let parsed: Table = serde_json::from_str(&text).unwrap();

        assert_eq!(parsed, table);
    }

    #[test]
    fn test_deserialize_duplicate_id_fails() {
        let text = r#"[{"id":"1","value":1},{"id":"1","value":2}]"#;
        assert!(serde_json::from_str::<Table>(text).is_err());
    }
}
