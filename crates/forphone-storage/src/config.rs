//! # Storage Configuration
//!
//! Where slots live on disk.
//!
//! ## Location Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. An explicit directory: StorageConfig::new(path)                     │
//! │     (the storefront passes its resolved data_dir here)                  │
//! │  2. Platform app data directory: StorageConfig::default_location()      │
//! │     • macOS:   ~/Library/Application Support/com.forphone.store         │
//! │     • Windows: %APPDATA%\forphone\store\data                            │
//! │     • Linux:   ~/.local/share/store                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Environment overrides belong to the application config; this crate never
//! reads the environment.

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::{StorageError, StorageResult};
use crate::file::FileStore;

/// Storage configuration.
///
/// ## Example
/// ```rust
/// use forphone_storage::StorageConfig;
///
/// let config = StorageConfig::new("/tmp/forphone");
/// assert_eq!(config.data_dir, std::path::PathBuf::from("/tmp/forphone"));
/// ```
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory for the file store.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Creates a configuration rooted at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: path.into(),
        }
    }

    /// Resolves the platform data directory.
    ///
    /// ## Errors
    /// `Unavailable` if no home directory can be determined.
    pub fn default_location() -> StorageResult<Self> {
        let dirs = ProjectDirs::from("com", "forphone", "store").ok_or_else(|| {
            StorageError::Unavailable("could not determine app data directory".to_string())
        })?;

        Ok(StorageConfig::new(dirs.data_dir()))
    }

    /// Opens a file store at the configured directory.
    pub fn open_file_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_data_dir() {
        let config = StorageConfig::new("/tmp/forphone-test");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/forphone-test"));
    }

    #[test]
    fn test_default_location_ignores_environment() {
        std::env::set_var("FORPHONE_DATA_DIR", "/tmp/forphone-env-dir");
        let resolved = StorageConfig::default_location();
        std::env::remove_var("FORPHONE_DATA_DIR");

        // Hosts without a home directory report Unavailable instead.
        match resolved {
            Ok(config) => {
                assert_ne!(config.data_dir, PathBuf::from("/tmp/forphone-env-dir"));
                assert!(config.data_dir.is_absolute());
            }
            Err(e) => assert!(matches!(e, StorageError::Unavailable(_))),
        }
    }

    #[test]
    fn test_open_file_store_uses_data_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = StorageConfig::new(temp_dir.path()).open_file_store();
        assert_eq!(store.dir(), temp_dir.path());
    }
}
