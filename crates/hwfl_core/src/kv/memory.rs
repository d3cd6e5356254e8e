//! In-process key-value store.

use super::{KeyValueStore, KvError, KvResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// `HashMap`-backed store; contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one key.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryKvStore {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let values = self.values.lock().map_err(|_| KvError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut values = self.values.lock().map_err(|_| KvError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
