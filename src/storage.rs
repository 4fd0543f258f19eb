//! Key-value persistence backends.
//!
//! The browser backend talks to `window.localStorage`; the in-memory backend
//! serves tests and acts as the fallback when the browser refuses storage
//! (private browsing, disabled cookies).

use std::collections::HashMap;

use crate::error::StorageError;

/// Fallible string key-value store scoped to the visitor's profile.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, resolved on every call.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn handle() -> Result<web_sys::Storage, StorageError> {
        let win = web_sys::window().ok_or(StorageError::Unavailable)?;
        match win.local_storage() {
            Ok(Some(store)) => Ok(store),
            _ => Err(StorageError::Unavailable),
        }
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{key}: {e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError surfaces here.
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{key}: {e:?}")))
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Picks `localStorage` when the browser grants it, otherwise a session-only
/// in-memory map.
pub fn default_store() -> Box<dyn KeyValueStore> {
    match BrowserStorage::handle() {
        Ok(_) => Box::new(BrowserStorage),
        Err(e) => {
            tracing::warn!("{e}; rewards will not survive this session");
            Box::new(MemoryStorage::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_returns_none_for_missing_key() {
        let store = MemoryStorage::new();
        assert_eq!(store.get("fractalix-rewards").unwrap(), None);
    }

    #[test]
    fn memory_storage_overwrites() {
        let mut store = MemoryStorage::new().with_entry("k", "old");
        store.set("k", "new").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("new"));
    }
}
