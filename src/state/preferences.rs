//! Persisted boolean preferences.
//!
//! Each flag lives under its own key with its own on/off encoding. Unknown
//! or absent values read as off.

use crate::model::StorageError;
use crate::storage::Storage;
use tracing::debug;

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme for a flag where `true` means dark.
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Whether this is the dark theme.
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// A boolean persisted as one of two strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolPreference {
    key: String,
    on: &'static str,
    off: &'static str,
}

impl BoolPreference {
    /// Flag encoded as `"true"` / `"false"`.
    pub fn flag(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            on: "true",
            off: "false",
        }
    }

    /// Theme encoded as `"dark"` / `"light"`, where on means dark.
    pub fn theme(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            on: "dark",
            off: "light",
        }
    }

    /// Storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored value; anything but the on-encoding is off.
    pub fn load(&self, storage: &dyn Storage) -> bool {
        storage.get(&self.key).as_deref() == Some(self.on)
    }

    /// Persist `value`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value could not be written.
    pub fn store(&self, storage: &mut dyn Storage, value: bool) -> Result<(), StorageError> {
        let encoded = if value { self.on } else { self.off };
        debug!(key = %self.key, value = encoded, "Persisting preference");
        storage.set(&self.key, encoded)
    }

    /// Flip `current`, persist the result, and return it.
    ///
    /// The returned value is the new state even when persisting fails; the
    /// error is reported alongside so the caller can log it.
    pub fn toggle(&self, storage: &mut dyn Storage, current: bool) -> (bool, Result<(), StorageError>) {
        let next = !current;
        (next, self.store(storage, next))
    }
}

/// In-memory view of the persisted preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub theme: Theme,
    pub immersive: bool,
    pub wake_lock: bool,
}
