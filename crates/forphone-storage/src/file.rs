//! # File-Backed Store
//!
//! One file per key under a data directory: `<dir>/<key>.json`.
//!
//! ## Write Path
//! ```text
//! set("forphoneCart", json)
//!      │
//!      ▼
//! create data dir if missing
//!      │
//!      ▼
//! write forphoneCart.json.tmp ──► fsync ──► rename over forphoneCart.json
//! ```
//!
//! The rename is atomic on the same filesystem, so a crash mid-write leaves
//! either the old slot or the new one, never a torn file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{StorageError, StorageResult};
use crate::store::{validate_key, KeyValueStore};

/// File-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        info!(dir = %dir.display(), "File store opened");
        FileStore { dir }
    }

    /// The directory slots are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;

        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let tmp_path = path.with_extension("json.tmp");
        let mut tmp_file = File::create(&tmp_path).map_err(|e| StorageError::io(key, e))?;
        tmp_file
            .write_all(value.as_bytes())
            .map_err(|e| StorageError::io(key, e))?;
        tmp_file.sync_all().map_err(|e| StorageError::io(key, e))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &path).map_err(|e| StorageError::io(key, e))?;

        debug!(key, path = %path.display(), bytes = value.len(), "file store write");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}
