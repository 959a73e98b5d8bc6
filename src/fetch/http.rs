//! HTTP page fetcher backed by `reqwest::blocking`.
//!
//! Each request runs on its own short-lived thread and posts a
//! [`FetchOutcome`] to the channel. The prefetch window is at most a handful
//! of pages, so a thread per request stays cheap.

use super::{FetchOutcome, FetchRequest, PageFetcher, PageImage};
use crate::model::FetchError;
use reqwest::blocking::Client;
use std::sync::mpsc::Sender;
use tracing::{debug, warn};

/// Fire-and-forget HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    outcomes: Sender<FetchOutcome>,
}

impl HttpFetcher {
    /// Build a fetcher that reports results on `outcomes`.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Client` if the TLS backend cannot be initialised.
    pub fn new(outcomes: Sender<FetchOutcome>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("mushaf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client, outcomes })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, request: FetchRequest) {
        let client = self.client.clone();
        let outcomes = self.outcomes.clone();
        let page = request.page;

        let spawned = std::thread::Builder::new()
            .name(format!("fetch-page-{page}"))
            .spawn(move || {
                let result = download(&client, &request.url);
                // The receiver only disappears at shutdown; a late result is simply dropped.
                let _ = outcomes.send(FetchOutcome {
                    page: request.page,
                    result,
                });
            });

        if let Err(err) = spawned {
            warn!(page = page.get(), error = %err, "Could not spawn fetch thread");
            let _ = self.outcomes.send(FetchOutcome {
                page,
                result: Err(FetchError::Transport {
                    url: String::new(),
                    reason: err.to_string(),
                }),
            });
        }
    }
}

/// Perform one blocking GET and collect the body.
fn download(client: &Client, url: &str) -> Result<PageImage, FetchError> {
    debug!(url, "Fetching page image");

    let response = client.get(url).send().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let bytes = response.bytes().map_err(|e| FetchError::Body {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PageImage::new(bytes.to_vec(), content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageBounds;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn unreachable_host_reports_transport_error() {
        let (tx, rx) = mpsc::channel();
        let fetcher = HttpFetcher::new(tx).unwrap();
        let page = PageBounds::default().page(3).unwrap();

        // Port 9 on localhost (discard) is closed on CI machines.
        fetcher.fetch(FetchRequest {
            page,
            url: "http://127.0.0.1:9/QK_003.webp".to_string(),
        });

        let outcome = rx
            .recv_timeout(Duration::from_secs(30))
            .expect("fetch thread should always report back");
        assert_eq!(outcome.page, page);
        assert!(matches!(outcome.result, Err(FetchError::Transport { .. })));
    }
}
