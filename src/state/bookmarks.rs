//! Bookmark collection persisted as a JSON array.
//!
//! Every operation is a full read-modify-write of the stored collection, so
//! the store itself holds nothing but the storage key.

use crate::model::bookmark::normalize_note;
use crate::model::{Bookmark, StorageError};
use crate::storage::Storage;
use tracing::{debug, warn};

/// Display format for bookmark dates: day/month/year without zero padding.
pub const DATE_FORMAT: &str = "%-d/%-m/%Y";

/// Today's date formatted for a bookmark.
pub fn today_display() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// CRUD over the persisted bookmark list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkStore {
    key: String,
}

impl BookmarkStore {
    /// Store bound to `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Storage key of the collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load all bookmarks in insertion order.
    ///
    /// A value that is not a JSON array loads as empty. Entries that do not
    /// decode as a bookmark are skipped one by one.
    pub fn list(&self, storage: &dyn Storage) -> Vec<Bookmark> {
        let Some(raw) = storage.get(&self.key) else {
            return Vec::new();
        };

        let values = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(values) => values,
            Err(err) => {
                warn!(key = %self.key, error = %err, "Bookmark collection is malformed, ignoring");
                return Vec::new();
            }
        };

        values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<Bookmark>(value) {
                Ok(bookmark) => Some(bookmark),
                Err(err) => {
                    warn!(error = %err, "Skipping malformed bookmark entry");
                    None
                }
            })
            .collect()
    }

    /// Bookmark for `page`, if any.
    pub fn find(&self, storage: &dyn Storage, page: u16) -> Option<Bookmark> {
        self.list(storage).into_iter().find(|b| b.page == page)
    }

    /// Insert or update the bookmark for `page`.
    ///
    /// An existing bookmark is replaced in place, keeping its position. A
    /// blank `note` keeps the note the bookmark already had.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated collection cannot be written.
    pub fn upsert(
        &self,
        storage: &mut dyn Storage,
        page: u16,
        note: Option<String>,
        date: impl Into<String>,
    ) -> Result<Vec<Bookmark>, StorageError> {
        let mut bookmarks = self.list(storage);
        let note = normalize_note(note);
        let date = date.into();

        match bookmarks.iter_mut().find(|b| b.page == page) {
            Some(existing) => {
                let note = note.or_else(|| existing.note.take());
                *existing = Bookmark::new(page, date, note);
                debug!(page, "Updated bookmark");
            }
            None => {
                bookmarks.push(Bookmark::new(page, date, note));
                debug!(page, "Added bookmark");
            }
        }

        self.save(storage, &bookmarks)?;
        Ok(bookmarks)
    }

    /// Remove the bookmark at `index`.
    ///
    /// Returns the removed bookmark, or `None` (and writes nothing) when the
    /// index is out of range.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated collection cannot be written.
    pub fn delete(
        &self,
        storage: &mut dyn Storage,
        index: usize,
    ) -> Result<Option<Bookmark>, StorageError> {
        let mut bookmarks = self.list(storage);
        if index >= bookmarks.len() {
            return Ok(None);
        }
        let removed = bookmarks.remove(index);
        debug!(page = removed.page, index, "Deleted bookmark");
        self.save(storage, &bookmarks)?;
        Ok(Some(removed))
    }

    fn save(&self, storage: &mut dyn Storage, bookmarks: &[Bookmark]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(bookmarks)?;
        storage.set(&self.key, &encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    const KEY: &str = "quran_bookmarks";

    fn store() -> (BookmarkStore, MemoryStorage) {
        (BookmarkStore::new(KEY), MemoryStorage::new())
    }

    fn pages(bookmarks: &[Bookmark]) -> Vec<u16> {
        bookmarks.iter().map(|b| b.page).collect()
    }

    #[test]
    fn list_is_empty_when_key_absent() {
        let (store, storage) = store();
        assert!(store.list(&storage).is_empty());
    }

    #[test]
    fn malformed_collection_loads_as_empty() {
        let store = BookmarkStore::new(KEY);
        let storage = MemoryStorage::with_values([(KEY, "{not an array")]);
        assert!(store.list(&storage).is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped_individually() {
        let store = BookmarkStore::new(KEY);
        let storage = MemoryStorage::with_values([(
            KEY,
            r#"[{"page":1,"date":"1/1/2025"},"garbage",{"date":"no page"},{"page":9}]"#,
        )]);
        assert_eq!(pages(&store.list(&storage)), vec![1, 9]);
    }

    #[test]
    fn upsert_appends_new_pages_in_order() {
        let (store, mut storage) = store();
        store.upsert(&mut storage, 5, None, "1/1/2025").unwrap();
        store.upsert(&mut storage, 2, None, "1/1/2025").unwrap();
        store.upsert(&mut storage, 9, None, "1/1/2025").unwrap();
        assert_eq!(pages(&store.list(&storage)), vec![5, 2, 9]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let (store, mut storage) = store();
        store.upsert(&mut storage, 5, Some("a".into()), "1/1/2025").unwrap();
        store.upsert(&mut storage, 6, None, "1/1/2025").unwrap();
        store.upsert(&mut storage, 5, Some("b".into()), "2/1/2025").unwrap();

        let list = store.list(&storage);
        assert_eq!(pages(&list), vec![5, 6]);
        assert_eq!(list[0].note.as_deref(), Some("b"));
        assert_eq!(list[0].date, "2/1/2025");
    }

    #[test]
    fn upsert_without_note_keeps_existing_note() {
        let (store, mut storage) = store();
        store
            .upsert(&mut storage, 10, Some("verse 5".into()), "1/1/2025")
            .unwrap();
        store.upsert(&mut storage, 10, None, "3/1/2025").unwrap();
        store
            .upsert(&mut storage, 10, Some("   ".into()), "4/1/2025")
            .unwrap();

        let list = store.list(&storage);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].note.as_deref(), Some("verse 5"));
        assert_eq!(list[0].date, "4/1/2025");
    }

    #[test]
    fn delete_removes_only_the_indexed_entry() {
        let (store, mut storage) = store();
        for page in [1, 2, 3, 4] {
            store.upsert(&mut storage, page, None, "d").unwrap();
        }

        let removed = store.delete(&mut storage, 1).unwrap();

        assert_eq!(removed.map(|b| b.page), Some(2));
        assert_eq!(pages(&store.list(&storage)), vec![1, 3, 4]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let (store, mut storage) = store();
        store.upsert(&mut storage, 1, None, "d").unwrap();
        assert_eq!(store.delete(&mut storage, 5).unwrap(), None);
        assert_eq!(pages(&store.list(&storage)), vec![1]);
    }

    #[test]
    fn stored_format_uses_note_key() {
        let (store, mut storage) = store();
        store
            .upsert(&mut storage, 3, Some("x".into()), "1/2/2025")
            .unwrap();
        assert_eq!(
            storage.get(KEY).as_deref(),
            Some(r#"[{"page":3,"date":"1/2/2025","note":"x"}]"#)
        );
    }

    #[test]
    fn today_has_no_zero_padding() {
        let today = today_display();
        let parts: Vec<&str> = today.split('/').collect();
        assert_eq!(parts.len(), 3);
        assert!(!parts[0].starts_with('0'));
        assert!(!parts[1].starts_with('0'));
        assert_eq!(parts[2].len(), 4);
    }
}
