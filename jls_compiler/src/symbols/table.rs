//! Identifier table built during a scan

use serde::Serialize;
use std::collections::BTreeMap;

/// Where an identifier was first seen and how often it occurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentifierEntry {
    pub first_line: u32,
    pub occurrences: usize,
}

/// Distinct identifier lexemes with set semantics. Iteration is sorted by
/// name; nothing here feeds back into parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IdentifierTable {
    entries: BTreeMap<String, IdentifierEntry>,
}

impl IdentifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an occurrence. Returns `true` the first time `name` is seen.
    pub fn insert(&mut self, name: &str, line: u32) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.occurrences += 1;
                false
            }
            None => {
                self.entries.insert(
                    name.to_string(),
                    IdentifierEntry {
                        first_line: line,
                        occurrences: 1,
                    },
                );
                true
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&IdentifierEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &IdentifierEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Total identifier occurrences, duplicates included
    pub fn total_occurrences(&self) -> usize {
        self.entries.values().map(|entry| entry.occurrences).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_semantics() {
        let mut table = IdentifierTable::new();

        assert!(table.insert("count", 1));
        assert!(table.insert("alpha", 2));
        assert!(!table.insert("count", 5));

        assert_eq!(table.len(), 2);
        assert!(table.contains("count"));
        assert!(!table.contains("Count"));
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["alpha", "count"]);
    }

    #[test]
    fn test_entry_tracks_first_line_and_occurrences() {
        let mut table = IdentifierTable::new();
        table.insert("x", 3);
        table.insert("x", 1);
        table.insert("y", 4);

        let x = table.get("x").unwrap();
        assert_eq!(x.first_line, 3);
        assert_eq!(x.occurrences, 2);
        assert_eq!(table.total_occurrences(), 3);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut table = IdentifierTable::new();
        table.insert("b", 1);
        table.insert("a", 2);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(
            json,
            r#"{"a":{"first_line":2,"occurrences":1},"b":{"first_line":1,"occurrences":1}}"#
        );
    }
}
