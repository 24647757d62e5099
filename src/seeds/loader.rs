// src/seeds/loader.rs
// =============================================================================
// Reads seed URLs.
//
// Seed file format:
// - UTF-8 text, one URL per line
// - surrounding whitespace is trimmed
// - blank lines and lines starting with '#' are skipped
// - lines that do not parse as a URL are logged and skipped; ordinals only
//   count the seeds that are kept
//
// The file is read from disk, or from the bucket when PDFs go to S3.
// =============================================================================

use crate::config::SinkKind;
use crate::error::SeedError;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// Where the seeds come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// A single root URL given directly
    Url(String),
    /// A line-delimited file of root URLs
    File(PathBuf),
    /// A line-delimited seed file stored in the bucket under this key
    Object(String),
}

impl SeedSource {
    /// Interprets a command-line source argument. A seed file lives next to
    /// the PDFs: on disk for the filesystem sink, in the bucket for s3.
    pub fn parse(source: &str, sink: SinkKind) -> Self {
        let source = source.trim();
        if source.starts_with("http") {
            return SeedSource::Url(source.to_string());
        }

        match sink {
            SinkKind::Fs => SeedSource::File(PathBuf::from(source)),
            SinkKind::S3 => SeedSource::Object(source.to_string()),
        }
    }
}

/// A root page to crawl, plus the key prefix its PDFs are stored under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// 1-based position in the seed list
    pub ordinal: usize,
    pub url: String,
    /// "" for a single-URL source, the ordinal for seed files
    pub prefix: String,
}

/// Loads the ordered seed list.
///
/// Fails when a seed file cannot be read or a single-URL source is not a
/// URL; an empty file simply produces no seeds. `store` is only consulted
/// for `SeedSource::Object`.
pub async fn load_seeds(
    source: &SeedSource,
    store: Option<&dyn ObjectStore>,
) -> Result<Vec<Seed>, SeedError> {
    match source {
        SeedSource::Url(url) => {
            Url::parse(url).map_err(|source| SeedError::InvalidUrl {
                url: url.clone(),
                source,
            })?;
            Ok(vec![Seed {
                ordinal: 1,
                url: url.clone(),
                prefix: String::new(),
            }])
        }
        SeedSource::File(path) => {
            info!(path = %path.display(), "reading seed file");

            let bytes = tokio::fs::read(path).await.map_err(|source| SeedError::Unreadable {
                path: path.clone(),
                source,
            })?;
            let content =
                String::from_utf8(bytes).map_err(|_| SeedError::NotUtf8 { path: path.clone() })?;

            Ok(numbered_seeds(&content))
        }
        SeedSource::Object(key) => {
            let store = store.ok_or_else(|| SeedError::NoStore { key: key.clone() })?;
            info!(key = %key, store = %store, "reading seed object");

            let store_err = |source| SeedError::Store {
                key: key.clone(),
                source,
            };
            let bytes = store
                .get(&ObjectPath::from(key.as_str()))
                .await
                .map_err(store_err)?
                .bytes()
                .await
                .map_err(store_err)?;
            let content = String::from_utf8(bytes.to_vec()).map_err(|_| SeedError::NotUtf8 {
                path: PathBuf::from(key),
            })?;

            Ok(numbered_seeds(&content))
        }
    }
}

// Valid seeds of a seed list, each saving under its own ordinal
fn numbered_seeds(content: &str) -> Vec<Seed> {
    let seeds: Vec<Seed> = parse_seed_list(content)
        .into_iter()
        .filter(|line| match Url::parse(line) {
            Ok(_) => true,
            Err(e) => {
                warn!(line = %line, error = %e, "skipping invalid seed URL");
                false
            }
        })
        .enumerate()
        .map(|(i, url)| Seed {
            ordinal: i + 1,
            url,
            prefix: (i + 1).to_string(),
        })
        .collect();

    info!(count = seeds.len(), "loaded seeds");
    seeds
}

/// Trimmed, non-empty, non-comment lines of a seed list, in order
pub fn parse_seed_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            let keep = !line.is_empty() && !line.starts_with('#');
            if !keep && !line.is_empty() {
                debug!(line, "skipping comment in seed list");
            }
            keep
        })
        .map(str::to_string)
        .collect()
}
