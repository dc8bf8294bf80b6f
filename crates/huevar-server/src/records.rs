//! Document records keyed by path.
//!
//! A record path looks like `users/{uid}/collections/{auto_id}`. Updates
//! merge top-level fields into the existing document, the way a realtime
//! database `update` does.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::error::{Result, ServerError};

/// Store of JSON documents.
pub trait RecordStore: Send + Sync {
    /// Merges `fields` into the record at `path`, creating it if needed.
    fn update(&self, path: &str, fields: Map<String, Value>) -> Result<()>;

    /// Returns the record at `path`, if any.
    fn get(&self, path: &str) -> Result<Option<Value>>;
}

/// In-memory [`RecordStore`], optionally mirrored to a JSON file.
///
/// The whole map is rewritten after every update.
#[derive(Debug, Default)]
pub struct JsonRecordStore {
    records: Mutex<BTreeMap<String, Value>>,
    path: Option<PathBuf>,
}

impl JsonRecordStore {
    /// Store that lives only in memory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store persisted at `path`; existing contents are loaded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), records = records.len(), "opened record store");
        Ok(Self {
            records: Mutex::new(records),
            path: Some(path),
        })
    }

    fn persist(&self, records: &BTreeMap<String, Value>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(records)?)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl RecordStore for JsonRecordStore {
    fn update(&self, path: &str, fields: Map<String, Value>) -> Result<()> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ServerError::internal("record store lock poisoned"))?;
        match records.get_mut(path) {
            Some(Value::Object(existing)) => existing.extend(fields),
            _ => {
                records.insert(path.to_string(), Value::Object(fields));
            }
        }
        self.persist(&records)?;
        tracing::trace!(path, "updated record");
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Option<Value>> {
        let records = self
            .records
            .lock()
            .map_err(|_| ServerError::internal("record store lock poisoned"))?;
        Ok(records.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_update_merges() {
        let store = JsonRecordStore::in_memory();
        store.update("r/1", fields(json!({"name": "a", "keep": 1}))).unwrap();
        store.update("r/1", fields(json!({"name": "b", "images": []}))).unwrap();
        assert_eq!(
            store.get("r/1").unwrap(),
            Some(json!({"name": "b", "keep": 1, "images": []}))
        );
        assert_eq!(store.get("r/2").unwrap(), None);
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db/records.json");
        {
            let store = JsonRecordStore::open(&path).unwrap();
            store.update("users/u/collections/c", fields(json!({"name": "c"}))).unwrap();
        }
        let reopened = JsonRecordStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("users/u/collections/c").unwrap(),
            Some(json!({"name": "c"}))
        );
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(JsonRecordStore::open(&path), Err(ServerError::Record(_))));
    }
}
