// src/crawl/mod.rs
// =============================================================================
// The Recursive Traversal Controller.
//
// Features:
// - Bounded-depth crawl per seed, staying on the seed page's origin
// - PDFs downloaded at most once per seed (a fresh dedup set per seed)
// - Each page's new PDFs downloaded as one concurrent batch, joined before
//   the crawl descends further
// - Fetch and download failures are logged and skipped, never fatal
//
// Sibling pages are visited one after the other, so the dedup set is a
// plain HashSet owned by the traversal. Visiting siblings in parallel
// would require a synchronized set.
// =============================================================================

mod report;
mod traversal;

pub use report::{CrawlReport, SeedReport};
pub use traversal::Traversal;

use crate::download::Downloader;
use crate::extract::LinkExtractor;
use crate::seeds::Seed;
use std::path::Path;
use tracing::{debug, info};

/// Ties the Link Extractor and the Download Sink together
pub struct Crawler {
    extractor: LinkExtractor,
    downloader: Downloader,
}

impl Crawler {
    pub fn new(extractor: LinkExtractor, downloader: Downloader) -> Self {
        Crawler {
            extractor,
            downloader,
        }
    }

    /// Crawls one seed `levels` hops deep and reports what was stored.
    ///
    /// `save_root` is only used to describe where the artifacts went.
    pub async fn crawl_seed(&self, seed: &Seed, levels: u32, save_root: &Path) -> SeedReport {
        info!(
            ordinal = seed.ordinal,
            seed = %seed.url,
            levels,
            "Extracting Main Source #{}: {}",
            seed.ordinal,
            seed.url
        );

        let mut traversal = Traversal::new(&seed.url, &seed.prefix, levels);
        traversal.run(self).await;
        debug!(seed = %seed.url, pdfs = ?traversal.unique_pdfs(), "dedup set at end of traversal");

        let save_path = save_root.join(&seed.prefix).display().to_string();
        let report = traversal.into_report(seed, save_path);

        info!(
            seed = %report.seed,
            pages = report.pages_visited,
            pdfs = report.pdfs_discovered,
            downloaded = report.downloaded.len(),
            failed = report.failed.len(),
            "finished seed"
        );

        report
    }

    /// Crawls every seed in order, each with its own dedup set
    pub async fn crawl(&self, seeds: &[Seed], levels: u32, save_root: &Path) -> CrawlReport {
        let mut report = CrawlReport {
            levels,
            seeds: Vec::with_capacity(seeds.len()),
        };

        for seed in seeds {
            report.seeds.push(self.crawl_seed(seed, levels, save_root).await);
        }

        report
    }
}
