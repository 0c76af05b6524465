//! Key-value persistence seam for the theme flag.

use std::collections::HashMap;

use crate::core::error::FolioError;

/// Minimal string key-value store. The browser implementation wraps
/// `localStorage`; tests and headless hosts use [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, FolioError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FolioError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store whose every operation fails, e.g. storage disabled in private browsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, FolioError> {
        Err(FolioError::Storage("no storage backend".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), FolioError> {
        Err(FolioError::Storage("no storage backend".into()))
    }
}
