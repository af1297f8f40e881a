//! Record store: identifier -> record
//!
//! BTreeMap keeps `all()` deterministic (ascending identifier).

use std::collections::BTreeMap;

use super::record::Record;

/// Flat mapping from identifier to record
#[derive(Debug, Default, Clone)]
pub struct RecordStore {
    records: BTreeMap<String, Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Insert or replace a record by identifier.
    ///
    /// Returns the record previously stored under the same identifier.
    pub fn insert_record(&mut self, record: Record) -> Option<Record> {
        self.records.insert(record.id.clone(), record)
    }

    /// Lookup by identifier
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.get(id)
    }

    /// All records in identifier order
    pub fn all(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
