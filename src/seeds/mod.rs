// src/seeds/mod.rs
// =============================================================================
// The Seed Loader: where the crawl starts.
//
// A seed source is either
// - a single URL (anything starting with "http"), crawled into the save
//   path directly, or
// - a text file with one URL per line, each crawled into its own numbered
//   subfolder of the save path ("1", "2", ...). With the s3 sink the file
//   is read from the same bucket the PDFs go to.
// =============================================================================

mod loader;

pub use loader::{load_seeds, Seed, SeedSource};
