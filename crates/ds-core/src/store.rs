//! Ordered in-memory collection of entries.
//!
//! Every entry's `index` equals its position. Deleting an entry shifts the
//! later ones left and renumbers them, so there are never gaps.

use std::io::{BufRead, Write};

use chrono::NaiveDate;
use thiserror::Error;

use crate::codec::{
    CodecError, TextReader, TextWriter, TokenWrite, decode_count, decode_entry,
    encode_count, encode_entry,
};
use crate::entry::Entry;
use crate::lookup::resolve_token;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The count header could not be read.
    #[error("failed to read entry count")]
    Count(#[source] CodecError),
    /// An entry could not be read.
    #[error("failed to read entry {position}")]
    Entry {
        position: usize,
        #[source]
        source: CodecError,
    },
    /// Writing the store failed.
    #[error("failed to write entries")]
    Write(#[from] CodecError),
    /// The name cannot be stored.
    #[error("invalid entry name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    /// The token matches no name and no valid index.
    #[error("entry not found: {token}")]
    NotFound { token: String },
    /// The index is past the end of the store.
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The entries tracked for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    entries: Vec<Entry>,
}

impl Store {
    /// Creates an empty store.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Decodes a store from its text form.
    pub fn load(reader: impl BufRead) -> Result<Self, StoreError> {
        let mut reader = TextReader::new(reader);
        let count = decode_count(&mut reader).map_err(StoreError::Count)?;
        tracing::debug!(count, "reading entries");

        let mut entries = Vec::new();
        for position in 0..count {
            let entry = decode_entry(&mut reader, position)
                .map_err(|source| StoreError::Entry { position, source })?;
            entries.push(entry);
        }

        // Anything past the declared count is ignored.
        Ok(Self { entries })
    }

    /// Encodes the store in position order.
    pub fn save(&self, writer: impl Write) -> Result<(), StoreError> {
        let mut writer = TextWriter::new(writer);
        encode_count(&mut writer, self.entries.len())?;
        for entry in &self.entries {
            encode_entry(&mut writer, entry)?;
        }
        writer.flush()?;
        tracing::debug!(count = self.entries.len(), "wrote entries");
        Ok(())
    }

    /// Appends a new entry first done on `today`.
    ///
    /// Surrounding whitespace is trimmed from `name`. Duplicate names are
    /// accepted; lookups find the first.
    pub fn add(&mut self, name: &str, today: NaiveDate) -> Result<&Entry, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
                reason: "name cannot be empty",
            });
        }
        if name.contains(['\n', '\r']) {
            return Err(StoreError::InvalidName {
                name: name.to_string(),
                reason: "name cannot span lines",
            });
        }
        if self.entries.iter().any(|entry| entry.name == name) {
            tracing::warn!(name, "an entry with this name already exists");
        }

        let index = self.entries.len();
        self.entries.push(Entry::new(index, name, today));
        Ok(&self.entries[index])
    }

    /// Resolves a name or decimal index to a position.
    pub fn find_by_token(&self, token: &str) -> Result<usize, StoreError> {
        resolve_token(&self.entries, token).ok_or_else(|| StoreError::NotFound {
            token: token.to_string(),
        })
    }

    /// Records an occurrence of the entry at `index` on `today`.
    pub fn reset(&mut self, index: usize, today: NaiveDate) -> Result<&Entry, StoreError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })?;
        entry.record(today);
        Ok(entry)
    }

    /// Removes and returns the entry at `index`, renumbering the rest.
    pub fn delete(&mut self, index: usize) -> Result<Entry, StoreError> {
        let len = self.entries.len();
        if index >= len {
            return Err(StoreError::IndexOutOfRange { index, len });
        }
        let removed = self.entries.remove(index);
        for (position, entry) in self.entries.iter_mut().enumerate().skip(index) {
            entry.index = position;
        }
        Ok(removed)
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with(names: &[&str]) -> Store {
        let mut store = Store::new();
        for name in names {
            store.add(name, day(2024, 1, 1)).unwrap();
        }
        store
    }

    fn assert_indices_match_positions(store: &Store) {
        for (position, entry) in store.iter().enumerate() {
            assert_eq!(entry.index, position, "entry {:?} misnumbered", entry.name);
        }
    }

    fn encode(store: &Store) -> String {
        let mut out = Vec::new();
        store.save(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_to_empty_store() {
        let today = day(2024, 5, 4);
        let mut store = Store::new();
        let entry = store.add("run", today).unwrap().clone();

        assert_eq!(entry.index, 0);
        assert_eq!(entry.num_times, 1);
        assert_eq!(entry.start_date, today);
        assert_eq!(entry.last_time, today);
        assert_eq!(entry.interval_days, -1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_appends_at_end() {
        let mut store = store_with(&["run", "read"]);
        let entry = store.add("  call mom ", day(2024, 1, 2)).unwrap();

        assert_eq!(entry.index, 2);
        assert_eq!(entry.name, "call mom");
    }

    #[test]
    fn test_add_rejects_unstorable_names() {
        let mut store = Store::new();

        assert!(matches!(
            store.add("   ", day(2024, 1, 1)),
            Err(StoreError::InvalidName { .. })
        ));
        assert!(matches!(
            store.add("two\nlines", day(2024, 1, 1)),
            Err(StoreError::InvalidName { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_allows_duplicate_names() {
        let mut store = store_with(&["run"]);
        store.add("run", day(2024, 1, 2)).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_by_token("run").unwrap(), 0);
    }

    #[test]
    fn test_reset_bumps_count_and_last_time() {
        let mut store = store_with(&["run", "read"]);
        let entry = store.reset(1, day(2024, 1, 20)).unwrap();

        assert_eq!(entry.num_times, 2);
        assert_eq!(entry.last_time, day(2024, 1, 20));
        assert_eq!(entry.start_date, day(2024, 1, 1));
        assert_eq!(store.get(0).unwrap().num_times, 1);
    }

    #[test]
    fn test_reset_out_of_range() {
        let mut store = store_with(&["run"]);
        assert!(matches!(
            store.reset(1, day(2024, 1, 2)),
            Err(StoreError::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_delete_shifts_and_renumbers() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        let removed = store.delete(1).unwrap();

        assert_eq!(removed.name, "b");
        assert_eq!(store.len(), 3);
        let names: Vec<_> = store.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "c", "d"]);
        assert_indices_match_positions(&store);
    }

    #[test]
    fn test_delete_out_of_range_leaves_store_untouched() {
        let mut store = store_with(&["a"]);
        assert!(matches!(
            store.delete(3),
            Err(StoreError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_indices_hold_across_adds_and_deletes() {
        let mut store = Store::new();
        let today = day(2024, 1, 1);
        for round in 0..5 {
            for n in 0..4 {
                store.add(&format!("e{round}-{n}"), today).unwrap();
            }
            store.delete(0).unwrap();
            store.delete(store.len() / 2).unwrap();
            assert_indices_match_positions(&store);
        }
        assert_eq!(store.len(), 10);
        while !store.is_empty() {
            store.delete(store.len() - 1).unwrap();
            assert_indices_match_positions(&store);
        }
    }

    #[test]
    fn test_find_by_token_not_found() {
        let store = store_with(&["run"]);
        let err = store.find_by_token("swim").unwrap_err();
        assert_eq!(err.to_string(), "entry not found: swim");
    }

    #[test]
    fn test_save_writes_count_then_entries() {
        let mut store = store_with(&["run", "read"]);
        store.reset(0, day(2024, 1, 9)).unwrap();

        assert_eq!(
            encode(&store),
            "2\nrun\n20240101\n2\n-1\n20240109\nread\n20240101\n1\n-1\n20240101\n"
        );
    }

    #[test]
    fn test_save_empty_store() {
        assert_eq!(encode(&Store::new()), "0\n");
    }

    #[test]
    fn test_load_assigns_positions() {
        let text = "2\nrun\n20240101\n2\n-1\n20240109\nread\n20231201\n0\n30\n20231201\n";
        let store = Store::load(Cursor::new(text)).unwrap();

        assert_eq!(store.len(), 2);
        assert_indices_match_positions(&store);
        assert_eq!(store.get(1).unwrap().interval_days, 30);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let mut store = store_with(&["run", "read", "stretch"]);
        store.reset(2, day(2024, 2, 14)).unwrap();
        store.delete(1).unwrap();

        let loaded = Store::load(Cursor::new(encode(&store))).unwrap();
        assert_eq!(loaded, store);
    }

    #[test]
    fn test_indented_names_survive_a_rewrite() {
        let text = "2\n  run\n20240101\n1\n-1\n20240101\n  indented\n20240101\n1\n-1\n20240101\n";
        let store = Store::load(Cursor::new(text)).unwrap();

        assert_eq!(store.get(0).unwrap().name, "  run");
        assert_eq!(store.get(1).unwrap().name, "  indented");
        assert_eq!(encode(&store), text);
        assert_eq!(Store::load(Cursor::new(encode(&store))).unwrap(), store);
    }

    #[test]
    fn test_load_reports_failing_entry() {
        let text = "2\nrun\n20240101\n2\n-1\n20240109\nread\n20231201\n";
        let err = Store::load(Cursor::new(text)).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Entry {
                position: 1,
                source: CodecError::UnexpectedEof { .. }
            }
        ));
    }

    #[test]
    fn test_load_rejects_malformed_count() {
        let err = Store::load(Cursor::new("two\n")).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Count(CodecError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_load_clamps_negative_counts() {
        let text = "1\nrun\n20240101\n-3\n-1\n20240109\n";
        let store = Store::load(Cursor::new(text)).unwrap();
        assert_eq!(store.get(0).unwrap().num_times, 0);
    }
}
