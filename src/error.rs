// src/error.rs
// =============================================================================
// Typed errors for every layer of the harvester.
//
// The lower layers (fetching, storage, seed loading) return these enums so
// the caller can decide what a failure means. The crawl controller turns
// fetch failures into "nothing found" and download failures into "skipped";
// only seed and config errors ever reach main.rs, where anyhow takes over.
// =============================================================================

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to retrieve a page or a PDF over HTTP
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered, but not with a 2xx status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The link could not even be turned into a request
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// Wraps a reqwest error, telling builder errors (bad URLs) apart
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_builder() {
            FetchError::InvalidUrl {
                url: url.to_string(),
                reason: source.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source,
            }
        }
    }

    /// HTTP status of the response, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to persist bytes to a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error writing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sink is append-only; an existing key is never overwritten
    #[error("key already exists: {0}")]
    Exists(String),

    #[error("invalid key '{0}'")]
    InvalidKey(String),

    #[error("object store error writing {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: object_store::Error,
    },
}

/// Failure of a single PDF download
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// The seed resource could not be read or is not a URL; fatal for the whole run
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot read seed file {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("seed file {path:?} is not valid UTF-8")]
    NotUtf8 { path: PathBuf },

    #[error("cannot read seed object {key}: {source}")]
    Store {
        key: String,
        #[source]
        source: object_store::Error,
    },

    #[error("seed source {key} is an object key, but no object store is configured")]
    NoStore { key: String },

    #[error("invalid seed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Invalid settings supplied on the command line or environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("the s3 sink needs a bucket name (--bucket / HARVEST_BUCKET)")]
    MissingBucket,

    #[error("failed to configure object store: {0}")]
    ObjectStore(#[source] object_store::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            url: "https://example.com/a.pdf".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/a.pdf returned HTTP 404 Not Found"
        );
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_download_error_is_transparent() {
        let err: DownloadError = SinkError::Exists("1/report_x.pdf".to_string()).into();
        assert_eq!(err.to_string(), "key already exists: 1/report_x.pdf");
    }
}
