//! # Storage Error Types
//!
//! Error types for key-value slot operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / quota check                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← Adds the key and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PersistenceError (storefront) ← Logged as a warning, never fatal      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use thiserror::Error;

/// Key-value storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would push the store past its byte quota.
    ///
    /// ## When This Occurs
    /// - `MemoryStore` configured with a quota, like browser local storage
    #[error("Storage quota exceeded: need {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// The key cannot be used as a slot name.
    #[error("Invalid storage key '{0}': use letters, digits, '-' or '_'")]
    InvalidKey(String),

    /// The backing store cannot be reached at all.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the slot failed.
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Wraps an I/O error with the key it happened on.
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::QuotaExceeded {
            needed: 120,
            available: 100,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: need 120 bytes, 100 available"
        );

        let err = StorageError::io("forphoneCart", io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert_eq!(err.to_string(), "I/O error on key 'forphoneCart': disk gone");
    }
}
