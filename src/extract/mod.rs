// src/extract/mod.rs
// =============================================================================
// The Link Extractor.
//
// Submodules:
// - origin: derives a URL's scheme+host(+port) prefix, absolutizes hrefs
// - links: classifies the anchors of a parsed page (PDFs vs. same-origin pages)
// - fetch: GETs pages over HTTP and reports failures as FetchError
// =============================================================================

mod fetch;
mod links;
mod origin;

pub use fetch::LinkExtractor;
pub use origin::origin;
