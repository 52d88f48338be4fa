//! Dual-backend music catalog client.
//!
//! One shared `reqwest::Client` with browser-ish default headers; the
//! per-backend modules own URL building and payload normalization into
//! the common [`Track`]/[`SearchPage`] shapes. Every call goes straight
//! to the network; page turns re-issue the search.

pub mod backup;
pub mod error;
pub mod models;
pub mod primary;

pub use error::{ApiError, ApiResult};
pub use models::{SearchPage, Source, Track};

use anyhow::Context;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;

/// Tracks per page on both backends.
pub const PAGE_SIZE: usize = 20;

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, */*"));
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { http })
    }

    pub async fn search(&self, query: &str, page: usize, source: Source) -> ApiResult<SearchPage> {
        match source {
            Source::Primary => primary::search(&self.http, query, page).await,
            Source::Backup => backup::search(&self.http, query, page).await,
        }
    }

    /// Resolve a track id into a directly playable stream URL.
    pub async fn resolve(&self, id: &str, source: Source) -> ApiResult<String> {
        match source {
            Source::Primary => primary::resolve(&self.http, id).await,
            Source::Backup => backup::resolve(&self.http, id).await,
        }
    }

    /// Fetch a track's lyrics as a raw LRC transcript.
    pub async fn lyrics(&self, id: &str, source: Source) -> ApiResult<String> {
        match source {
            Source::Primary => primary::lyrics(&self.http, id).await,
            Source::Backup => backup::lyrics(&self.http, id).await,
        }
    }

    /// Fetch the full body of an already-resolved stream URL.
    pub async fn fetch_bytes(&self, url: &str) -> ApiResult<Vec<u8>> {
        let resp = self.http.get(url).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }
}

pub(crate) fn page_count(total_count: u64) -> usize {
    (total_count as usize).div_ceil(PAGE_SIZE)
}

/// A page index past the end is a caller mistake, not an empty page;
/// `page_index < total_pages` must hold on every returned [`SearchPage`].
pub(crate) fn check_page(page: usize, total_pages: usize) -> ApiResult<()> {
    if total_pages > 0 && page >= total_pages {
        return Err(ApiError::NotFound(format!(
            "page {} is out of range ({total_pages} page(s) total)",
            page + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(41), 3);
        assert_eq!(page_count(40), 2);
        assert_eq!(page_count(25), 2);
        assert_eq!(page_count(20), 1);
        assert_eq!(page_count(1), 1);
    }

    #[test]
    fn page_count_zero_results_means_no_pages() {
        assert_eq!(page_count(0), 0);
    }

    #[test]
    fn page_navigation_bounds() {
        let page = SearchPage {
            tracks: vec![],
            page_index: 0,
            total_pages: 0,
        };
        assert!(!page.has_next());
        assert!(!page.has_prev());

        let page = SearchPage {
            tracks: vec![],
            page_index: 1,
            total_pages: 3,
        };
        assert!(page.has_next());
        assert!(page.has_prev());

        let page = SearchPage {
            tracks: vec![],
            page_index: 2,
            total_pages: 3,
        };
        assert!(!page.has_next());
    }
}
