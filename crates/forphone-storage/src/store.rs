//! # KeyValueStore Trait
//!
//! The seam between the cart and wherever its bytes live.
//!
//! Implementations are synchronous: every call completes before returning,
//! matching the single-threaded storefront.

use crate::error::{StorageError, StorageResult};

/// String-keyed slot storage.
///
/// ## Contract
/// - `get` on a missing key returns `Ok(None)`
/// - `set` replaces the whole slot
/// - `remove` on a missing key is `Ok(())`
pub trait KeyValueStore {
    /// Reads the slot stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes `value` into the slot under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes the slot under `key`.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Lets callers lend a store instead of handing it over.
impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Validates a slot key.
///
/// ## Rules
/// - Not empty, at most 64 characters
/// - Only ASCII letters, digits, `-` and `_` (keys become file names)
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("forphoneCart").is_ok());
        assert!(validate_key("cart_v2-backup").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("has space").is_err());
        assert!(validate_key(&"k".repeat(65)).is_err());
    }

    fn write_slot<S: KeyValueStore>(mut store: S) {
        store.set("k", "v").unwrap();
    }

    #[test]
    fn test_borrowed_store_writes_through() {
        let mut store = MemoryStore::new();
        write_slot(&mut store);
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        let mut boxed: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        boxed.set("k", "boxed").unwrap();
        assert_eq!(boxed.get("k").unwrap().as_deref(), Some("boxed"));
    }
}
