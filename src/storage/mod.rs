//! Persistent key/value storage.
//!
//! This module provides the storage adapter used for reading state:
//! - In-memory storage for tests and `--storage` less sessions
//! - File storage backed by a single JSON object on disk
//! - `StorageKeys` naming every persisted value
//!
//! Values are plain strings (stringified integers, flags, or JSON documents).
//! There is no schema version: every reader must tolerate absent or malformed
//! values and fall back to a default.

use crate::model::StorageError;
use std::collections::BTreeMap;

pub mod file;

pub use file::FileStorage;

/// Flat string key/value store.
///
/// All access happens on the UI thread, so implementations need no locking.
pub trait Storage {
    /// Read a value. Absent keys return `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the value could not be persisted. The
    /// in-memory view is updated regardless, so subsequent reads in the same
    /// session still observe the write.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value. Absent keys are ignored.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile storage that lives as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-populated with values.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Names of every persisted value, derived from a namespace.
///
/// The default namespace `quran` yields the keys already present in
/// existing installations (`quran_last_page`, `quran_bookmarks`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    /// Last-read page, stringified integer.
    pub last_page: String,
    /// Bookmarks, JSON array.
    pub bookmarks: String,
    /// Theme, `"dark"` or `"light"`.
    pub theme: String,
    /// Immersive mode, `"true"` or `"false"`.
    pub immersive: String,
    /// Keep-awake desired, `"true"` or `"false"`.
    pub wake_lock: String,
}

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "quran";

impl StorageKeys {
    /// Derive all keys from a namespace prefix.
    pub fn with_namespace(namespace: &str) -> Self {
        Self {
            last_page: format!("{namespace}_last_page"),
            bookmarks: format!("{namespace}_bookmarks"),
            theme: format!("{namespace}_theme"),
            immersive: format!("{namespace}_immersive"),
            wake_lock: format!("{namespace}_wake_lock"),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(DEFAULT_NAMESPACE)
    }
}
