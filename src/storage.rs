/// Key-value persistence backends for the recent-selection store

use crate::error::StoreError;
use std::cell::RefCell;
use std::collections::HashMap;

/// String key-value storage, the shape of `window.localStorage`
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and when browser storage is unavailable
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by the page's `localStorage`
#[derive(Debug, Clone)]
pub struct BrowserStore {
    storage: web_sys::Storage,
}

impl BrowserStore {
    pub fn new() -> Result<Self, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::StorageUnavailable("no window".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(|e| StoreError::StorageUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::StorageUnavailable("localStorage is disabled".to_string()))?;

        Ok(BrowserStore { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage.get_item(key).map_err(|e| StoreError::StorageRead {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError::StorageWrite {
            key: key.to_string(),
            reason: format!("{:?}", e),
        })
    }
}

/// Whichever backend the popup could get hold of
#[derive(Debug)]
pub enum PopupStore {
    Browser(BrowserStore),
    Memory(MemoryStore),
}

impl PopupStore {
    /// Prefer `localStorage`, falling back to memory so selection still works
    pub fn open() -> Self {
        match BrowserStore::new() {
            Ok(store) => PopupStore::Browser(store),
            Err(e) => {
                log::warn!("Falling back to in-memory recent list: {}", e);
                PopupStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl KeyValueStore for PopupStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            PopupStore::Browser(store) => store.get_item(key),
            PopupStore::Memory(store) => store.get_item(key),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            PopupStore::Browser(store) => store.set_item(key, value),
            PopupStore::Memory(store) => store.set_item(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_new() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();

        let value = store.get_item("recentAwsRegions").unwrap();

        assert_eq!(value, None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();

        store.set_item("recentGcpProjects", "[]").unwrap();

        assert_eq!(store.get_item("recentGcpProjects").unwrap(), Some("[]".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set_item("key", "old").unwrap();

        store.set_item("key", "new").unwrap();

        assert_eq!(store.get_item("key").unwrap(), Some("new".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_popup_store_memory_variant_delegates() {
        let store = PopupStore::Memory(MemoryStore::new());

        store.set_item("key", "value").unwrap();

        assert_eq!(store.get_item("key").unwrap(), Some("value".to_string()));
    }
}
