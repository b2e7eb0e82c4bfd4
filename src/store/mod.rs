//! Key-value storage for the analysis record.
//!
//! The pages share state through a single JSON-serialized record stored
//! under a fixed key. This module abstracts that storage so every stage
//! can run against a file on disk or an in-memory map.

mod file;
#[cfg(test)]
mod memory;

pub use file::FileStore;
#[cfg(test)]
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::AnalysisRecord;
use tracing::{debug, warn};

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load the record stored under `key`.
///
/// A value that does not parse as a record is treated the same as a
/// missing one.
pub fn load_record<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> Result<Option<AnalysisRecord>, StoreError> {
    let Some(raw) = store.get(key)? else {
        debug!("No value stored under '{}'", key);
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(record) => Ok(Some(record)),
        Err(e) => {
            warn!("Ignoring unreadable record under '{}': {}", key, e);
            Ok(None)
        }
    }
}

/// Serialize and store the whole record under `key`.
pub fn save_record<S: KeyValueStore + ?Sized>(
    store: &mut S,
    key: &str,
    record: &AnalysisRecord,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(record)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_roundtrip_through_store() {
        let mut store = MemoryStore::new();
        let record = AnalysisRecord::new("Acme", "Retail", "q1.csv");

        save_record(&mut store, "businessData", &record).unwrap();
        let loaded = load_record(&store, "businessData").unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn test_missing_key_loads_none() {
        let store = MemoryStore::new();
        assert_eq!(load_record(&store, "businessData").unwrap(), None);
    }

    #[test]
    fn test_garbage_value_loads_none() {
        let mut store = MemoryStore::new();
        store.set("businessData", "null").unwrap();
        assert_eq!(load_record(&store, "businessData").unwrap(), None);

        store.set("businessData", "{not json").unwrap();
        assert_eq!(load_record(&store, "businessData").unwrap(), None);
    }
}
