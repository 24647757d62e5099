// src/download/mod.rs
// =============================================================================
// The Download Sink: fetches PDFs and stores them.
//
// How it works:
// 1. GET the PDF (redirects are followed by the HTTP client)
// 2. Non-2xx or network failure -> DownloadError, logged, no retry
// 3. Success -> derive "<stem>_<token><ext>" and put the bytes to the sink
//
// A batch (all new PDFs of one page) runs concurrently with a bounded
// number of downloads in flight, and is fully awaited before returning.
// Every download yields its own Result, so one failure never cancels the
// others.
// =============================================================================

mod naming;

use naming::{artifact_key, artifact_name};

use crate::error::{DownloadError, FetchError};
use crate::sink::Sink;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of one attempted download
#[derive(Debug)]
pub struct DownloadOutcome {
    /// The PDF URL that was requested
    pub url: String,
    /// The sink key it was stored under, or why it was not
    pub result: Result<String, DownloadError>,
}

/// Fetches PDFs and writes them to a sink
#[derive(Clone)]
pub struct Downloader {
    client: Client,
    sink: Arc<dyn Sink>,
    concurrency: usize,
}

impl Downloader {
    pub fn new(client: Client, sink: Arc<dyn Sink>, concurrency: usize) -> Self {
        Downloader {
            client,
            sink,
            // buffer_unordered(0) would never make progress
            concurrency: concurrency.max(1),
        }
    }

    /// Downloads a single PDF and stores it below `prefix`.
    ///
    /// Returns the sink key of the stored artifact.
    pub async fn download(&self, pdf_url: &str, prefix: &str) -> Result<String, DownloadError> {
        let response = self
            .client
            .get(pdf_url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(pdf_url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: pdf_url.to_string(),
                status,
            }
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(pdf_url, e))?;

        let key = artifact_key(prefix, &artifact_name(pdf_url));
        self.sink.put(&key, &body).await?;
        Ok(key)
    }

    /// Downloads every URL in `urls` concurrently and waits for all of them.
    ///
    /// Outcomes come back in completion order, one per input URL.
    pub async fn download_batch<I>(&self, urls: I, prefix: &str) -> Vec<DownloadOutcome>
    where
        I: IntoIterator<Item = String>,
    {
        let urls: Vec<String> = urls.into_iter().collect();
        let total = urls.len();
        if total == 0 {
            return Vec::new();
        }

        info!(count = total, sink = %self.sink.describe(), "starting PDF downloads");

        let futures = urls.into_iter().enumerate().map(|(i, url)| async move {
            let result = self.download(&url, prefix).await;
            match &result {
                Ok(key) => info!(n = i + 1, total, url = %url, key = %key, "downloaded PDF"),
                Err(e) => warn!(n = i + 1, total, url = %url, error = %e, "PDF download failed"),
            }
            DownloadOutcome { url, result }
        });

        stream::iter(futures)
            .buffer_unordered(self.concurrency)
            .collect()
            .await
    }
}
