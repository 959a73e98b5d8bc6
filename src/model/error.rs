//! Error types for the mushaf reader.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via
//! `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Start-up failures that abort the process before the UI opens
//!   - [`ConfigError`](crate::config::ConfigError) - unreadable or invalid config file
//!   - [`LoggingError`](crate::logging::LoggingError) - log directory or subscriber setup
//!   - [`StorageError`] - persistent storage could not be opened
//!   - [`FetchError`] - HTTP client could not be built
//!   - `std::io::Error` - terminal setup and rendering
//!
//! # Error Recovery Strategy
//!
//! Once the reader is running nothing is fatal. Storage write failures are logged
//! and the in-memory state carries on; a page that fails to load shows a retry
//! control; prefetch failures are logged and dropped; an unavailable wake lock
//! disables the keep-awake toggle.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all start-up failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Tracing could not be initialised.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Persistent storage could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The page fetcher could not be created.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors from the key/value storage adapter.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("Failed to read storage file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be written.
    #[error("Failed to write storage file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key/value map could not be encoded.
    #[error("Failed to encode storage contents: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors produced while fetching a page image.
///
/// Cloneable so that a failed cache entry can carry its reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// HTTP client construction failed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("Request for {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The server answered with a non-success status.
    #[error("Request for {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be read completely.
    #[error("Failed to read body of {url}: {reason}")]
    Body { url: String, reason: String },
}

/// Errors from the wake-lock capability.
#[derive(Debug, Error)]
pub enum WakeLockError {
    /// No wake-lock mechanism is available on this platform.
    #[error("Wake lock is not supported on this system")]
    Unsupported,

    /// The inhibitor process could not be started.
    #[error("Failed to start wake-lock command {program:?}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
