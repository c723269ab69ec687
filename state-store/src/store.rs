//! The store trait and its in-memory implementation

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, StoreError};

/// Persistent string key-value storage
///
/// Implementations use interior mutability so a store can be shared between
/// its owner and whoever inspects it.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; deleting a missing key is not an error
    fn delete(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }
}

/// Volatile store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.values.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryStore::new();
        assert_eq!(store.get("playerUid").unwrap(), None);

        store.set("playerUid", "RINCON_A").unwrap();
        assert_eq!(store.get("playerUid").unwrap().as_deref(), Some("RINCON_A"));

        store.set("playerUid", "RINCON_B").unwrap();
        assert_eq!(store.get("playerUid").unwrap().as_deref(), Some("RINCON_B"));
        assert_eq!(store.len(), 1);

        store.delete("playerUid").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_missing_key() {
        let store = MemoryStore::new();
        assert!(store.delete("nothing").is_ok());
    }

    #[test]
    fn test_store_clone_shares_state() {
        let store1 = MemoryStore::new();
        let store2 = store1.clone();

        store1.set("playerAddress", "10.0.0.4:1400").unwrap();

        // Both clones see the same data
        assert_eq!(store2.get("playerAddress").unwrap().as_deref(), Some("10.0.0.4:1400"));
    }

    #[test]
    fn test_boxed_store_is_a_store() {
        let store: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
