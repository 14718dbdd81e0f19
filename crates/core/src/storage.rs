//! Durable client-side key/value storage.
//!
//! Stores persist whole snapshots under a fixed key after every mutation and
//! read them back once at startup. The trait is synchronous: a write returns
//! only once the value is durable (or has failed).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Errors raised by a [`Storage`] backend.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend refused the write (e.g., quota exceeded).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key/value store in the shape of browser local storage.
pub trait Storage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`Storage`].
///
/// Clones share the same map, so a second store built from a clone sees what
/// the first one wrote, the same way a restarted process sees the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set_item`/`remove_item` fail with
    /// [`StorageError::Unavailable`] until switched off again.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of keys currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.lock().remove(key);
        Ok(())
    }
}
