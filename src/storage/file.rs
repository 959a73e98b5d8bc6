//! JSON-file storage backend.
//!
//! The whole key/value map lives in one JSON object. It is read once when the
//! storage is opened and rewritten on every mutation (write to a temporary
//! sibling, then rename).

use super::Storage;
use crate::model::StorageError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Write-through storage persisted as a JSON object.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open storage at `path`.
    ///
    /// A missing file is not an error: storage starts empty and the file is
    /// created on the first write. A file that exists but does not contain a
    /// JSON object of strings (including one that is not UTF-8) is treated as
    /// empty and logged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Read` if the file exists but cannot be read,
    /// e.g. for lack of permission.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if !path.exists() {
            debug!(path = ?path, "Storage file absent, starting empty");
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let bytes = std::fs::read(&path).map_err(|source| StorageError::Read {
            path: path.clone(),
            source,
        })?;

        let values = match serde_json::from_slice::<BTreeMap<String, String>>(&bytes) {
            Ok(values) => values,
            Err(err) => {
                warn!(path = ?path, error = %err, "Storage file is malformed, ignoring contents");
                BTreeMap::new()
            }
        };

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let encoded = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");

        std::fs::write(&tmp, encoded).map_err(|source| StorageError::Write {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Resolve default storage path.
///
/// Returns `~/.local/share/mushaf/storage.json` on Unix-like systems, or the
/// platform data directory elsewhere. Falls back to the current directory.
pub fn default_storage_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("mushaf").join("storage.json")
    } else {
        PathBuf::from("mushaf-storage.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("mushaf_storage_test_{}_{name}", std::process::id()))
            .join("storage.json")
    }

    #[test]
    fn open_missing_file_starts_empty() {
        let path = temp_path("missing");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("anything"), None);
        assert!(!path.exists(), "Opening must not create the file");
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.set("quran_last_page", "42").unwrap();
            storage.set("quran_theme", "dark").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("quran_last_page").as_deref(), Some("42"));
        assert_eq!(reopened.get("quran_theme").as_deref(), Some("dark"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_treated_as_empty() {
        let path = temp_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json at all").unwrap();

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("quran_last_page"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn non_utf8_file_is_treated_as_empty() {
        let path = temp_path("non_utf8");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(storage.get("quran_last_page"), None);

        // The next write replaces the unreadable contents
        storage.set("quran_last_page", "7").unwrap();
        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("quran_last_page").as_deref(), Some("7"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn unreadable_path_reports_read_error() {
        // A directory exists but cannot be read as a file
        let path = temp_path("is_dir");
        fs::create_dir_all(&path).unwrap();

        let result = FileStorage::open(&path);
        assert!(matches!(result, Err(StorageError::Read { .. })));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn remove_persists_deletion() {
        let path = temp_path("remove");
        let _ = fs::remove_dir_all(path.parent().unwrap());

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("k", "v").unwrap();
        storage.remove("k").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("k"), None);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn default_storage_path_ends_with_storage_json() {
        let path = default_storage_path();
        assert!(path.to_string_lossy().ends_with("storage.json"));
    }
}
