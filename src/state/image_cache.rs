//! Prefetching page-image cache.
//!
//! Unbounded map from page number to fetch status. There is no eviction:
//! the book has 604 pages and the cache lives only as long as the process.
//! Reusing this for a larger corpus would need a bounded eviction policy.

use crate::fetch::{AssetLocator, FetchOutcome, FetchRequest, PageFetcher, PageImage};
use crate::model::{FetchError, PageNumber};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Status of a single page in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// Request issued, no result yet.
    InFlight,
    /// Image available.
    Ready(PageImage),
    /// Last attempt failed; the next `ensure` re-issues the request.
    Failed(FetchError),
}

/// What the renderer needs to know about a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus<'a> {
    /// Never requested.
    Unrequested,
    /// Request in flight.
    Loading,
    /// Image available.
    Ready(&'a PageImage),
    /// Last attempt failed.
    Failed(&'a FetchError),
}

/// Why a page is being requested, which decides how a failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    /// The page on screen.
    Display,
    /// A neighbour fetched ahead of time.
    Prefetch,
}

/// Image cache issuing fire-and-forget requests through a [`PageFetcher`].
pub struct ImageCache {
    locator: AssetLocator,
    fetcher: Box<dyn PageFetcher>,
    entries: HashMap<PageNumber, CacheEntry>,
    purposes: HashMap<PageNumber, Purpose>,
}

impl ImageCache {
    /// Create an empty cache.
    pub fn new(locator: AssetLocator, fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            locator,
            fetcher,
            entries: HashMap::new(),
            purposes: HashMap::new(),
        }
    }

    /// The locator used to build request URLs.
    pub fn locator(&self) -> &AssetLocator {
        &self.locator
    }

    /// Request `page` unless it is already cached or in flight.
    ///
    /// Returns `true` when a new request was issued.
    pub fn ensure(&mut self, page: PageNumber, purpose: Purpose) -> bool {
        match self.entries.get(&page) {
            Some(CacheEntry::Ready(_)) => false,
            Some(CacheEntry::InFlight) => {
                // Upgrade so that a failure of a now-displayed page is surfaced.
                if purpose == Purpose::Display {
                    self.purposes.insert(page, Purpose::Display);
                }
                false
            }
            Some(CacheEntry::Failed(_)) | None => {
                self.issue(page, purpose);
                true
            }
        }
    }

    /// Re-issue a request for a page whose last attempt failed.
    ///
    /// Returns `true` when a new request was issued.
    pub fn retry(&mut self, page: PageNumber) -> bool {
        match self.entries.get(&page) {
            Some(CacheEntry::Failed(_)) | None => {
                self.issue(page, Purpose::Display);
                true
            }
            Some(CacheEntry::InFlight) | Some(CacheEntry::Ready(_)) => false,
        }
    }

    fn issue(&mut self, page: PageNumber, purpose: Purpose) {
        let url = self.locator.url_for(page);
        debug!(page = page.get(), ?purpose, url = %url, "Requesting page image");
        self.entries.insert(page, CacheEntry::InFlight);
        self.purposes.insert(page, purpose);
        self.fetcher.fetch(FetchRequest { page, url });
    }

    /// Record a fetch result.
    ///
    /// Results are stored whatever the current page is; a late result for a
    /// page that is no longer adjacent is kept and otherwise ignored.
    pub fn complete(&mut self, outcome: FetchOutcome) {
        let FetchOutcome { page, result } = outcome;
        let purpose = self
            .purposes
            .remove(&page)
            .unwrap_or(Purpose::Prefetch);

        let entry = match result {
            Ok(image) => CacheEntry::Ready(image),
            Err(err) => {
                match purpose {
                    Purpose::Prefetch => {
                        warn!(page = page.get(), error = %err, "Prefetch failed")
                    }
                    Purpose::Display => {
                        warn!(page = page.get(), error = %err, "Failed to load page")
                    }
                }
                CacheEntry::Failed(err)
            }
        };

        // Never downgrade a successful image to a failure from a stale duplicate.
        if matches!(self.entries.get(&page), Some(CacheEntry::Ready(_)))
            && matches!(entry, CacheEntry::Failed(_))
        {
            return;
        }
        self.entries.insert(page, entry);
    }

    /// Status of `page` for rendering.
    pub fn status(&self, page: PageNumber) -> PageStatus<'_> {
        match self.entries.get(&page) {
            None => PageStatus::Unrequested,
            Some(CacheEntry::InFlight) => PageStatus::Loading,
            Some(CacheEntry::Ready(image)) => PageStatus::Ready(image),
            Some(CacheEntry::Failed(err)) => PageStatus::Failed(err),
        }
    }

    /// Cached image for `page`, if any.
    pub fn get(&self, page: PageNumber) -> Option<&PageImage> {
        match self.entries.get(&page) {
            Some(CacheEntry::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// Number of pages with any status.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of pages currently in flight.
    pub fn in_flight(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| matches!(entry, CacheEntry::InFlight))
            .count()
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("locator", &self.locator)
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "image_cache_tests.rs"]
mod tests;
