//! Mushaf reader
//!
//! Terminal reader for the 604-page scanned mushaf: page navigation with
//! neighbour prefetch, surah index, bookmarks, persisted preferences and an
//! optional keep-awake inhibitor.
//!
//! Pure model types live in [`model`]; [`state`] holds the reader logic over
//! injectable storage, fetch and wake-lock capabilities; [`view`] is the
//! ratatui shell.

pub mod config;
pub mod fetch;
pub mod logging;
pub mod model;
pub mod state;
pub mod storage;
pub mod view;
