// src/config.rs
// =============================================================================
// Runtime settings for a crawl.
//
// Values come from the command line, which falls back to environment
// variables (and therefore to a .env file loaded at startup). This module
// validates them and builds the shared HTTP client and, for the s3 sink,
// the object store client.
// =============================================================================

use crate::error::ConfigError;
use clap::ValueEnum;
use object_store::aws::AmazonS3Builder;
use object_store::ObjectStore;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SAVE_PATH: &str = "data/raw";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where downloaded PDFs (and a seed file) live
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Local filesystem
    #[default]
    Fs,
    /// S3 bucket, credentials from the usual AWS_* environment
    S3,
}

/// Settings shared by every seed of one run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Page-to-page hops allowed from each seed
    pub levels: u32,
    /// Root directory (or key prefix in the bucket) for stored PDFs
    pub save_path: PathBuf,
    pub sink: SinkKind,
    /// Bucket name, required by the s3 sink
    pub bucket: Option<String>,
    /// Maximum downloads in flight per batch
    pub concurrency: usize,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            levels: 0,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            sink: SinkKind::Fs,
            bucket: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

impl CrawlConfig {
    /// Rejects settings that would stall or hang the crawl
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.sink == SinkKind::S3 && self.bucket_name().is_none() {
            return Err(ConfigError::MissingBucket);
        }
        Ok(())
    }

    fn bucket_name(&self) -> Option<&str> {
        self.bucket.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }

    /// The object store behind the s3 sink, None for the filesystem sink.
    ///
    /// Region, credentials and endpoint come from the AWS_* environment.
    pub fn object_store(&self) -> Result<Option<Arc<dyn ObjectStore>>, ConfigError> {
        if self.sink == SinkKind::Fs {
            return Ok(None);
        }

        let bucket = self.bucket_name().ok_or(ConfigError::MissingBucket)?;
        let store: Arc<dyn ObjectStore> = Arc::new(
            AmazonS3Builder::from_env()
                .with_bucket_name(bucket)
                .build()
                .map_err(ConfigError::ObjectStore)?,
        );

        Ok(Some(store))
    }

    /// One client for the whole run (connection pooling).
    ///
    /// Redirects use reqwest's default policy.
    pub fn http_client(&self) -> Result<Client, ConfigError> {
        Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(ConfigError::HttpClient)
    }
}

pub fn default_user_agent() -> String {
    format!("pdf-harvester/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CrawlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.levels, 0);
        assert!(config.user_agent.starts_with("pdf-harvester/"));
    }

    #[test]
    fn test_zero_values_are_rejected() {
        let config = CrawlConfig {
            concurrency: 0,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroConcurrency)));

        let config = CrawlConfig {
            timeout: Duration::ZERO,
            ..CrawlConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_builds_client() {
        assert!(CrawlConfig::default().http_client().is_ok());
    }

    #[test]
    fn test_fs_sink_has_no_object_store() {
        assert!(CrawlConfig::default().object_store().unwrap().is_none());
    }

    #[test]
    fn test_s3_sink_needs_a_bucket() {
        for bucket in [None, Some("  ".to_string())] {
            let config = CrawlConfig {
                sink: SinkKind::S3,
                bucket,
                ..CrawlConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::MissingBucket)));
            assert!(matches!(config.object_store(), Err(ConfigError::MissingBucket)));
        }
    }

    #[test]
    fn test_s3_sink_builds_store_from_bucket() {
        let config = CrawlConfig {
            sink: SinkKind::S3,
            bucket: Some("harvest-bucket".to_string()),
            ..CrawlConfig::default()
        };
        assert!(config.validate().is_ok());

        let store = config.object_store().unwrap().unwrap();
        assert!(store.to_string().contains("harvest-bucket"));
    }
}
