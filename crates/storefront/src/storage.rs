//! File-backed durable storage.
//!
//! # Layout
//!
//! One JSON file per key inside the data directory:
//!
//! - `shopeasy.cart.json` - Cart snapshot
//! - `shopeasy.wishlist.json` - Saved products
//! - `shopeasy.session.json` - Mock login session
//!
//! Writes go through a temp file in the same directory followed by a rename,
//! so a reader never sees a half-written snapshot.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use shopeasy_core::{Storage, StorageError};
use tempfile::NamedTempFile;

/// [`Storage`] over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Rejects keys that are empty or could escape the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::Unavailable(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(key, e))?;

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| io_error(key, e))?;
        tmp.write_all(value.as_bytes())
            .map_err(|e| io_error(key, e))?;
        tmp.as_file().sync_all().map_err(|e| io_error(key, e))?;
        tmp.persist(&path).map_err(|e| io_error(key, e.error))?;

        tracing::trace!(path = %path.display(), bytes = value.len(), "Snapshot written");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}
