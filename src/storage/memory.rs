// src/storage/memory.rs

//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;

/// In-memory store, used by tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let store = Self::new();
        store.insert(key, value)?;
        Ok(store)
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.lock()?.insert(key.into(), value.into());
        Ok(())
    }

    pub fn value(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// A poisoned lock is reported as a store error.
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>> {
        self.values
            .lock()
            .map_err(|e| AppError::store(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.value(key)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.insert(key, value)
    }
}
