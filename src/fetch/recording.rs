//! Fetcher that records requests instead of performing them.
//!
//! Used by tests to observe what the cache asked for, and to feed outcomes
//! back by hand in whatever order a scenario needs.

use super::{FetchRequest, PageFetcher};
use crate::model::PageNumber;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every request in a shared log.
#[derive(Debug, Clone, Default)]
pub struct RecordingFetcher {
    requests: Rc<RefCell<Vec<FetchRequest>>>,
}

impl RecordingFetcher {
    /// Create a fetcher with an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests issued so far, oldest first.
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }

    /// Pages requested so far, oldest first.
    pub fn pages(&self) -> Vec<u16> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.page.get())
            .collect()
    }

    /// How many times `page` was requested.
    pub fn count_for(&self, page: PageNumber) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.page == page)
            .count()
    }

    /// Forget recorded requests.
    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl PageFetcher for RecordingFetcher {
    fn fetch(&self, request: FetchRequest) {
        self.requests.borrow_mut().push(request);
    }
}
