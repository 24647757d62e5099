// src/crawl/report.rs
// =============================================================================
// What a crawl produced, per seed. Serializable so `--json` can print it.
// =============================================================================

use serde::Serialize;

/// A PDF that was discovered but not stored
#[derive(Debug, Clone, Serialize)]
pub struct FailedDownload {
    pub url: String,
    pub reason: String,
}

/// Outcome of crawling one seed
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedReport {
    pub ordinal: usize,
    pub seed: String,
    /// Where this seed's artifacts were written
    pub save_path: String,
    pub pages_visited: usize,
    pub pages_failed: usize,
    /// Size of the dedup set at the end of the traversal
    pub pdfs_discovered: usize,
    /// Sink keys of the stored artifacts
    pub downloaded: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedDownload>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub levels: u32,
    pub seeds: Vec<SeedReport>,
}

impl CrawlReport {
    pub fn total_downloaded(&self) -> usize {
        self.seeds.iter().map(|s| s.downloaded.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.seeds.iter().map(|s| s.failed.len()).sum()
    }
}
