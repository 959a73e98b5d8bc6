//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod bookmark;
pub mod error;
pub mod key_action;
pub mod page;
pub mod surah;

// Re-export for convenience
pub use bookmark::Bookmark;
pub use error::{AppError, FetchError, StorageError, WakeLockError};
pub use key_action::KeyAction;
pub use page::{
    InvalidPage, PageBounds, PageNumber, PageStep, ReadingDirection, Side, DEFAULT_TOTAL_PAGES,
};
pub use surah::{Surah, SURAHS};
