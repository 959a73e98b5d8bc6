//! Page image fetching.
//!
//! - [`AssetLocator`] turns a page number into the URL of its image
//! - [`PageFetcher`] issues fire-and-forget requests
//! - [`FetchOutcome`] carries each result back to the UI thread
//!
//! Fetchers never block the caller. Results arrive later through the channel
//! handed to the fetcher at construction; the image cache is the only consumer.

use crate::model::{FetchError, PageNumber};
use std::sync::Arc;

pub mod http;
pub mod recording;

pub use http::HttpFetcher;
pub use recording::RecordingFetcher;

/// Default image host.
pub const DEFAULT_ASSET_BASE_URL: &str = "https://media.qurankemenag.net/khat2";
/// Default file-name prefix.
pub const DEFAULT_ASSET_PREFIX: &str = "QK";
/// Default file extension.
pub const DEFAULT_ASSET_EXTENSION: &str = "webp";
/// Page numbers are zero-padded to this many digits.
pub const PAGE_NUMBER_WIDTH: usize = 3;

/// Deterministic page → URL mapping.
///
/// `<base-url>/<prefix>_<page zero-padded to 3>.<ext>`, which for the defaults
/// gives `https://media.qurankemenag.net/khat2/QK_001.webp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocator {
    base_url: String,
    prefix: String,
    extension: String,
}

impl AssetLocator {
    /// Build a locator. A trailing `/` on the base URL is ignored.
    pub fn new(
        base_url: impl Into<String>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let extension = extension.into().trim_start_matches('.').to_string();
        Self {
            base_url,
            prefix: prefix.into(),
            extension,
        }
    }

    /// URL of the image for `page`.
    pub fn url_for(&self, page: PageNumber) -> String {
        format!(
            "{}/{}_{:0width$}.{}",
            self.base_url,
            self.prefix,
            page.get(),
            self.extension,
            width = PAGE_NUMBER_WIDTH
        )
    }
}

impl Default for AssetLocator {
    fn default() -> Self {
        Self::new(
            DEFAULT_ASSET_BASE_URL,
            DEFAULT_ASSET_PREFIX,
            DEFAULT_ASSET_EXTENSION,
        )
    }
}

/// A fetched page image.
///
/// The bytes are shared so the cache can hand out handles without copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// Raw encoded image bytes.
    pub bytes: Arc<[u8]>,
    /// `Content-Type` reported by the server, if any.
    pub content_type: Option<String>,
}

impl PageImage {
    /// Wrap raw bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>, content_type: Option<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type,
        }
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the body was empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A single fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: PageNumber,
    pub url: String,
}

/// Result of a fetch, delivered asynchronously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub page: PageNumber,
    pub result: Result<PageImage, FetchError>,
}

/// Fire-and-forget page fetcher.
///
/// `fetch` must return immediately. Each request resolves independently;
/// there is no ordering between outcomes and no cancellation.
pub trait PageFetcher {
    fn fetch(&self, request: FetchRequest);
}

impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    fn fetch(&self, request: FetchRequest) {
        (**self).fetch(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageBounds;

    fn page(n: i64) -> PageNumber {
        PageBounds::default().page(n).unwrap()
    }

    #[test]
    fn default_locator_matches_asset_host_layout() {
        let locator = AssetLocator::default();
        assert_eq!(
            locator.url_for(page(1)),
            "https://media.qurankemenag.net/khat2/QK_001.webp"
        );
        assert_eq!(
            locator.url_for(page(42)),
            "https://media.qurankemenag.net/khat2/QK_042.webp"
        );
        assert_eq!(
            locator.url_for(page(604)),
            "https://media.qurankemenag.net/khat2/QK_604.webp"
        );
    }

    #[test]
    fn locator_tolerates_trailing_slash_and_leading_dot() {
        let locator = AssetLocator::new("http://localhost:8080/pages/", "P", ".png");
        assert_eq!(locator.url_for(page(7)), "http://localhost:8080/pages/P_007.png");
    }

    #[test]
    fn page_image_reports_length() {
        let image = PageImage::new(vec![1u8, 2, 3], Some("image/webp".into()));
        assert_eq!(image.len(), 3);
        assert!(!image.is_empty());
    }
}
