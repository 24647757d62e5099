// src/main.rs
// =============================================================================
// This is the entry point of the harvester.
//
// What happens here:
// 1. Load .env, parse command-line arguments, set up logging
// 2. Dispatch to the appropriate subcommand handler
// 3. Print the report (table or JSON)
// 4. Exit with a proper code (0 = crawl ran, 1 = page unreachable for
//    `links`, 2 = fatal error such as an unreadable seed file)
//
// PDFs go to the local filesystem or, with --sink s3, to a bucket.
// =============================================================================

mod cli;
mod config;
mod crawl;
mod download;
mod error;
mod extract;
mod logging;
mod seeds;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use crawl::{CrawlReport, Crawler};
use download::Downloader;
use extract::LinkExtractor;
use seeds::SeedSource;
use serde::Serialize;
use sink::{FsSink, ObjectStoreSink, Sink};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use url::Url;

#[tokio::main]
async fn main() {
    // A missing .env file is fine; real environment variables still apply
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_format);

    let code = exit_code(run(cli).await);
    std::process::exit(code);
}

// Fatal errors are logged and mapped to exit code 2
fn exit_code(result: Result<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Crawl(args) => handle_crawl(&args).await,
        Commands::Links {
            url,
            json,
            timeout_secs,
        } => handle_links(&url, json, timeout_secs).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: &CrawlArgs) -> Result<i32> {
    let config = args.to_config();
    config.validate().context("invalid configuration")?;

    let store = config.object_store()?;
    let source = SeedSource::parse(&args.source, config.sink);
    let seeds = seeds::load_seeds(&source, store.as_deref())
        .await
        .context("no sources to process")?;

    if seeds.is_empty() {
        warn!(source = %args.source, "seed list is empty, nothing to crawl");
    }

    let client = config.http_client()?;
    let sink: Arc<dyn Sink> = match store {
        Some(store) => Arc::new(ObjectStoreSink::new(store, &config.save_path)),
        None => Arc::new(FsSink::new(&config.save_path)),
    };
    let crawler = Crawler::new(
        LinkExtractor::new(client.clone()),
        Downloader::new(client, sink, config.concurrency),
    );

    let report = crawler
        .crawl(&seeds, config.levels, &config.save_path)
        .await;

    info!(
        seeds = report.seeds.len(),
        downloaded = report.total_downloaded(),
        failed = report.total_failed(),
        "crawl finished"
    );

    print_output(&report, args.json, print_table)?;
    Ok(0)
}

#[derive(Serialize)]
struct LinksReport {
    url: String,
    origin: Option<String>,
    pdf_links: Vec<String>,
    page_links: Vec<String>,
}

// Handles the 'links' subcommand
async fn handle_links(url: &str, json: bool, timeout_secs: u64) -> Result<i32> {
    Url::parse(url).with_context(|| format!("invalid URL '{}'", url))?;

    let config = config::CrawlConfig {
        timeout: Duration::from_secs(timeout_secs),
        ..config::CrawlConfig::default()
    };
    config.validate()?;
    let extractor = LinkExtractor::new(config.http_client()?);

    let (pdfs, pages) = match (
        extractor.extract_pdf_links(url).await,
        extractor.extract_page_links(url).await,
    ) {
        (Ok(pdfs), Ok(pages)) => (pdfs, pages),
        (Err(e), _) | (_, Err(e)) => {
            error!(url, error = %e, "could not fetch page");
            return Ok(1);
        }
    };

    let mut pdf_links: Vec<String> = pdfs.into_iter().collect();
    let mut page_links: Vec<String> = pages.into_iter().collect();
    pdf_links.sort();
    page_links.sort();

    let report = LinksReport {
        url: url.to_string(),
        origin: extract::origin(url).map(str::to_string),
        pdf_links,
        page_links,
    };

    print_output(&report, json, print_links)?;
    Ok(0)
}

// Prints a report either through `table` or as pretty JSON on stdout
fn print_output<T: Serialize>(report: &T, json: bool, table: fn(&T)) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        table(report);
    }
    Ok(())
}

// Prints the crawl report as a human-readable table
fn print_table(report: &CrawlReport) {
    println!(
        "{:<4} {:<50} {:>6} {:>6} {:>6} {:>6}",
        "#", "SEED", "PAGES", "PDFS", "SAVED", "FAILED"
    );
    println!("{}", "=".repeat(83));

    for seed in &report.seeds {
        println!(
            "{:<4} {:<50} {:>6} {:>6} {:>6} {:>6}",
            seed.ordinal,
            truncate(&seed.seed, 50),
            seed.pages_visited,
            seed.pdfs_discovered,
            seed.downloaded.len(),
            seed.failed.len()
        );
        for failed in &seed.failed {
            println!("     failed: {} ({})", failed.url, failed.reason);
        }
    }

    println!();
    println!("Summary (levels = {}):", report.levels);
    println!("   Seeds: {}", report.seeds.len());
    println!("   Saved: {}", report.total_downloaded());
    println!("   Failed: {}", report.total_failed());
}

fn print_links(report: &LinksReport) {
    println!("Page:   {}", report.url);
    println!("Origin: {}", report.origin.as_deref().unwrap_or("-"));

    println!("\nPDF links ({}):", report.pdf_links.len());
    for link in &report.pdf_links {
        println!("   {}", link);
    }

    println!("\nPage links ({}):", report.page_links.len());
    for link in &report.page_links {
        println!("   {}", link);
    }
}

// Shortens long URLs for the table, on a char boundary
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawl_args(argv: &[&str]) -> CrawlArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };
        args
    }

    #[tokio::test]
    async fn test_missing_seed_file_exits_with_2() {
        let args = crawl_args(&[
            "pdf-harvester",
            "crawl",
            "/definitely/not/here.txt",
            "--sink",
            "fs",
        ]);

        let result = handle_crawl(&args).await;
        assert!(result.is_err());
        assert_eq!(exit_code(result), 2);
    }

    #[tokio::test]
    async fn test_s3_sink_without_bucket_exits_with_2() {
        let args = crawl_args(&["pdf-harvester", "crawl", "seeds.txt", "--sink", "s3"]);
        assert_eq!(exit_code(handle_crawl(&args).await), 2);
    }

    #[tokio::test]
    async fn test_unreachable_links_page_exits_with_1() {
        let result = handle_links("http://127.0.0.1:9/", false, 2).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_links_rejects_invalid_url() {
        let result = handle_links("not a url", false, 2).await;
        assert_eq!(exit_code(result), 2);
    }

    #[test]
    fn test_exit_code_passes_through_ok() {
        assert_eq!(exit_code(Ok(0)), 0);
        assert_eq!(exit_code(Ok(1)), 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("https://example.com/a/very/long/path", 12), "https://e...");
    }
}
