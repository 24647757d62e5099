// src/extract/fetch.rs
// =============================================================================
// Fetches HTML pages and hands them to the link classifier.
//
// Every operation returns a Result: a network failure and a non-2xx status
// are reported as different FetchError variants so they can be logged
// differently. Deciding that "fetch failed" means "no links" is the crawl
// controller's job, not ours.
// =============================================================================

use super::links::Page;
use crate::error::FetchError;
use reqwest::Client;
use std::collections::HashSet;
use tracing::debug;

/// Link Extractor: GETs a page and classifies its outbound links
#[derive(Clone)]
pub struct LinkExtractor {
    client: Client,
}

impl LinkExtractor {
    /// Reuses a shared client (connection pooling, timeout, user agent)
    pub fn new(client: Client) -> Self {
        LinkExtractor { client }
    }

    /// Fetches `url` once and parses it, ready for both link queries
    pub async fn fetch_page(&self, url: &str) -> Result<Page, FetchError> {
        let html = fetch_html(&self.client, url).await?;
        Ok(Page::parse(url, &html))
    }

    /// PDF links on the page at `url`
    pub async fn extract_pdf_links(&self, url: &str) -> Result<HashSet<String>, FetchError> {
        Ok(self.fetch_page(url).await?.pdf_links())
    }

    /// Same-origin, non-PDF page links on the page at `url`
    pub async fn extract_page_links(&self, url: &str) -> Result<HashSet<String>, FetchError> {
        Ok(self.fetch_page(url).await?.page_links())
    }
}

// Fetches a web page and returns its body as text
async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchError> {
    debug!(url, "fetching page");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))
}
