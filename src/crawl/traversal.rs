// src/crawl/traversal.rs
// =============================================================================
// Bounded-depth traversal of one seed.
//
// How it works:
// 1. Start with the seed on a stack, carrying the full depth budget
// 2. Pop a page, fetch it once, collect its PDF links
// 3. Drop PDFs already in the dedup set, add the rest, download them as
//    one concurrent batch and wait for the batch
// 4. If the page still has budget, push its same-origin page links with
//    the budget decremented
// 5. Repeat until the stack is empty
//
// The stack gives the same depth-first visiting order as recursing into
// each child page in turn, without growing the call stack. Each `step`
// handles exactly one page, so a single step can be tested on its own.
//
// Only PDFs are deduplicated. A page reachable along two paths is fetched
// once per path (bounded by the depth budget).
// =============================================================================

use super::report::{FailedDownload, SeedReport};
use super::Crawler;
use crate::seeds::Seed;
use std::collections::HashSet;
use tracing::{info, warn};

// A page waiting to be visited
#[derive(Debug, Clone)]
struct CrawlItem {
    url: String,
    remaining_levels: u32,
    depth: u32,     // hops from the seed
    position: usize, // 1-based index among its siblings
    siblings: usize,
}

/// What a single step did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub url: String,
    pub depth: u32,
    /// False when the page fetch failed (treated as an empty page)
    pub fetched: bool,
    /// PDFs on this page not seen earlier in the traversal
    pub new_pdfs: usize,
    /// Page links queued for a deeper visit
    pub queued: usize,
}

/// Traversal state for one seed
pub struct Traversal {
    prefix: String,
    stack: Vec<CrawlItem>,
    unique_pdfs: HashSet<String>,
    pages_visited: usize,
    pages_failed: usize,
    downloaded: Vec<String>,
    failed: Vec<FailedDownload>,
}

impl Traversal {
    /// A fresh traversal from `url` with an empty dedup set.
    ///
    /// Artifacts are stored below `prefix`; `levels` is the number of
    /// page-to-page hops allowed from the seed.
    pub fn new(url: &str, prefix: &str, levels: u32) -> Self {
        Traversal {
            prefix: prefix.to_string(),
            stack: vec![CrawlItem {
                url: url.to_string(),
                remaining_levels: levels,
                depth: 0,
                position: 1,
                siblings: 1,
            }],
            unique_pdfs: HashSet::new(),
            pages_visited: 0,
            pages_failed: 0,
            downloaded: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Every PDF URL discovered so far
    pub fn unique_pdfs(&self) -> &HashSet<String> {
        &self.unique_pdfs
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Visits the next page. Returns None once the traversal is exhausted.
    pub async fn step(&mut self, crawler: &Crawler) -> Option<StepOutcome> {
        let item = self.stack.pop()?;
        self.pages_visited += 1;

        // A failed fetch counts as a page without links
        let page = match crawler.extractor.fetch_page(&item.url).await {
            Ok(page) => Some(page),
            Err(e) => {
                warn!(
                    url = %item.url,
                    status = ?e.status(),
                    error = %e,
                    "could not fetch page, treating it as empty"
                );
                self.pages_failed += 1;
                None
            }
        };

        let found = page.as_ref().map(|p| p.pdf_links()).unwrap_or_default();
        let mut new_pdfs: Vec<String> = found
            .into_iter()
            .filter(|url| !self.unique_pdfs.contains(url))
            .collect();
        new_pdfs.sort();
        self.unique_pdfs.extend(new_pdfs.iter().cloned());

        info!(
            depth = item.depth,
            pdfs = new_pdfs.len(),
            source = %item.url,
            "Depth Level {} -> {} PDFs found -> Source: {}",
            item.depth,
            new_pdfs.len(),
            item.url
        );

        let new_count = new_pdfs.len();
        let outcomes = crawler.downloader.download_batch(new_pdfs, &self.prefix).await;
        for outcome in outcomes {
            match outcome.result {
                Ok(key) => self.downloaded.push(key),
                Err(e) => self.failed.push(FailedDownload {
                    url: outcome.url,
                    reason: e.to_string(),
                }),
            }
        }

        if item.depth > 0 {
            info!(
                "{}Depth Level {} -> {}/{} URLs -> Source: {}",
                "...".repeat(item.depth as usize - 1),
                item.depth,
                item.position,
                item.siblings,
                item.url
            );
        }

        let mut queued = 0;
        if item.remaining_levels > 0 {
            if let Some(page) = &page {
                let mut links: Vec<String> = page.page_links().into_iter().collect();
                links.sort();
                queued = links.len();

                // Pushed in reverse so the first link is visited first
                for (i, url) in links.into_iter().enumerate().rev() {
                    self.stack.push(CrawlItem {
                        url,
                        remaining_levels: item.remaining_levels - 1,
                        depth: item.depth + 1,
                        position: i + 1,
                        siblings: queued,
                    });
                }
            }
        }

        Some(StepOutcome {
            url: item.url,
            depth: item.depth,
            fetched: page.is_some(),
            new_pdfs: new_count,
            queued,
        })
    }

    /// Runs the traversal to the end
    pub async fn run(&mut self, crawler: &Crawler) {
        while !self.is_done() {
            self.step(crawler).await;
        }
    }

    /// Summarizes the finished traversal for `seed`
    pub fn into_report(self, seed: &Seed, save_path: String) -> SeedReport {
        SeedReport {
            ordinal: seed.ordinal,
            seed: seed.url.clone(),
            save_path,
            pages_visited: self.pages_visited,
            pages_failed: self.pages_failed,
            pdfs_discovered: self.unique_pdfs.len(),
            downloaded: self.downloaded,
            failed: self.failed,
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a stack instead of recursion?
//    - An async fn cannot call itself without boxing the future
//    - The stack holds (url, remaining_levels) pairs, which is all the state
//      a recursive call would have carried
//    - Popping from the end and pushing children in reverse visits pages
//      in the same depth-first order a recursive walk would
//
// 2. Why is the dedup set a plain HashSet?
//    - Only one page is being processed at a time
//    - Downloads run concurrently, but the set is updated before the batch
//      starts and not touched while it runs
//
// 3. What does remaining_levels = 0 mean?
//    - The page's PDFs are collected, its page links are never followed
//    - So a crawl with levels = N fetches pages at most N hops from the seed
// -----------------------------------------------------------------------------
