//! Reader state machine.
//!
//! Everything here is testable without a terminal. Platform capabilities
//! (storage, fetching, wake lock) come in as trait objects.

pub mod app_state;
pub mod bookmark_modal;
pub mod bookmarks;
pub mod image_cache;
pub mod list_selection;
pub mod mouse_handler;
pub mod navigation;
pub mod preferences;
pub mod surah_picker;
pub mod wake_lock;

// Re-export for convenience
pub use app_state::{AppState, Capabilities, ReaderOptions};
pub use bookmark_modal::BookmarkModalState;
pub use bookmarks::BookmarkStore;
pub use image_cache::{ImageCache, PageStatus, Purpose};
pub use list_selection::ListSelection;
pub use mouse_handler::{
    hit_test, Gesture, HitRegions, HitTarget, SwipeTracker, TapZones, Zone, ZoneAction,
};
pub use navigation::{prefetch_window, Navigator, Transition};
pub use preferences::{BoolPreference, Preferences, Theme};
pub use surah_picker::SurahPickerState;
pub use wake_lock::{
    detect_wake_lock, InhibitorWakeLock, ManualWakeLock, UnsupportedWakeLock, WakeLock,
    WakeLockController,
};
