//! MemoryBackend: HashMap-based backend with RwLock
//!
//! The simplest [`Backend`]: entries live in a `HashMap<String, String>`
//! behind a `parking_lot::RwLock`. Nothing survives the process. Shared via
//! `Arc` by any number of adapters.

use std::collections::HashMap;

use parking_lot::RwLock;

use tagkv_core::{Backend, Result};

/// In-memory string key-value backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create a new empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all namespaces
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether no entries are stored
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.data.write().clear();
    }
}

impl Backend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(String, String)>> {
        Ok(self
            .data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.read().keys().cloned().collect())
    }
}
