//! # In-Memory Store
//!
//! `HashMap`-backed slots. Used by tests and by the shell's `--ephemeral`
//! mode. An optional byte quota mimics the "quota exceeded" failure of
//! browser local storage so write-failure paths can be exercised.

use std::collections::HashMap;
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::{validate_key, KeyValueStore};

/// In-memory key-value store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    /// Maximum total of key + value bytes, if limited.
    quota_bytes: Option<usize>,
    /// Set by `unavailable()`: every call fails.
    unavailable: bool,
}

impl MemoryStore {
    /// Creates an empty, unlimited store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates an empty store holding at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        MemoryStore {
            quota_bytes: Some(bytes),
            ..MemoryStore::default()
        }
    }

    /// Creates a store whose every operation fails with `Unavailable`.
    ///
    /// Stands in for storage that is disabled or blocked.
    pub fn unavailable() -> Self {
        MemoryStore {
            unavailable: true,
            ..MemoryStore::default()
        }
    }

    /// Seeds a slot directly, bypassing quota and key checks.
    ///
    /// ## Usage
    /// Tests use this to plant corrupted payloads.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.slots.insert(key.into(), value.into());
    }

    /// Bytes currently used by keys plus values.
    pub fn used_bytes(&self) -> usize {
        self.slots.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable {
            return Err(StorageError::Unavailable(
                "in-memory store is disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_available()?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.check_available()?;
        validate_key(key)?;

        if let Some(quota) = self.quota_bytes {
            // The slot being replaced frees its own bytes.
            let current = self.used_bytes()
                - self.slots.get(key).map(|v| key.len() + v.len()).unwrap_or(0);
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(current);

            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }

        debug!(key, bytes = value.len(), "memory store write");
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.check_available()?;
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[1]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[1]"));

        store.set("cart", "[2]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.len(), 1);

        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
        store.remove("cart").unwrap();
    }

    #[test]
    fn test_quota_exceeded() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "12345").unwrap(); // 6 bytes

        let err = store.set("j", "12345").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded { needed: 6, available: 4 }
        ));
        assert_eq!(store.get("j").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_slot_as_free() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "123456789").unwrap(); // 10 bytes, full
        store.set("k", "987654321").unwrap(); // same size replaces fine
        assert_eq!(store.get("k").unwrap().as_deref(), Some("987654321"));
    }

    #[test]
    fn test_unavailable_store_fails_every_call() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("k"), Err(StorageError::Unavailable(_))));
        assert!(matches!(store.set("k", "v"), Err(StorageError::Unavailable(_))));
        assert!(matches!(store.remove("k"), Err(StorageError::Unavailable(_))));
    }

    #[test]
    fn test_invalid_key_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.set("bad key", "v"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
