//! `KeyValueStore`: the string-keyed persistence interface.
//!
//! The configuration manager and the metrics collector write through to a
//! store on every mutation and reload from it on construction. Persistence is
//! a side effect: callers catch and log `StorageError` rather than propagate it.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::errors::StorageError;

/// Namespaced keys used by the engine.
pub mod keys {
    /// Pattern configuration: enable flag, rule registry, local counters.
    pub const PATTERN_CONFIG: &str = "pattern-config";
    /// Configuration settings (feature flags, pass threshold).
    pub const SETTINGS: &str = "pattern-config:settings";
    /// Manual override records.
    pub const OVERRIDES: &str = "pattern-config:overrides";
    /// Metrics event logs.
    pub const METRICS: &str = "metrics";
}

/// String get/set/remove by key.
///
/// Implementations use interior mutability so one store can be shared behind
/// an `Arc` by several handles.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored key, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.lock()?.keys().cloned().collect())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::Unavailable {
            message: "memory store lock poisoned".to_string(),
        })
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
