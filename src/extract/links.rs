// src/extract/links.rs
// =============================================================================
// Classifies the anchors of an HTML page into two disjoint sets:
//
// - PDF links: every <a href> ending in the literal suffix ".pdf"
//   (case-sensitive), absolutized against the page origin. PDFs are kept
//   no matter which site they live on.
// - Page links: every <a href> absolutized the same way, then filtered to
//   the ones that start with the page origin and do NOT end in ".pdf".
//   These form the frontier for descending further.
//
// Both functions are pure: same HTML in, same set out. Sets give
// deduplication for free (two anchors to the same PDF count once).
// =============================================================================

use super::origin::{absolutize, origin};
use scraper::{Html, Selector};
use std::collections::HashSet;

const PDF_SUFFIX: &str = ".pdf";

/// A fetched HTML page, parsed once and queried for both link classes
pub struct Page {
    url: String,
    hrefs: Vec<String>,
}

impl Page {
    /// Parses the HTML of the page served at `url`
    pub fn parse(url: &str, html: &str) -> Self {
        let document = Html::parse_document(html);
        // Constant selector, known to be valid
        let selector = Selector::parse("a[href]").expect("static selector");

        let hrefs = document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect();

        Page {
            url: url.to_string(),
            hrefs,
        }
    }

    /// Absolute URLs of every PDF linked from this page
    pub fn pdf_links(&self) -> HashSet<String> {
        let Some(base) = origin(&self.url) else {
            return HashSet::new();
        };

        self.hrefs
            .iter()
            .filter(|href| href.ends_with(PDF_SUFFIX))
            .map(|href| absolutize(base, href))
            .collect()
    }

    /// Absolute same-origin URLs of every non-PDF page linked from this page
    pub fn page_links(&self) -> HashSet<String> {
        let Some(base) = origin(&self.url) else {
            return HashSet::new();
        };

        self.hrefs
            .iter()
            .map(|href| absolutize(base, href))
            .filter(|link| link.starts_with(base) && !link.ends_with(PDF_SUFFIX))
            .collect()
    }
}
