// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every crawl setting can also come from an environment variable (the `env`
// attribute), and main.rs loads a .env file before parsing, so a deployment
// can be configured without touching the command line.
// =============================================================================

use crate::config::{
    default_user_agent, CrawlConfig, SinkKind, DEFAULT_CONCURRENCY, DEFAULT_SAVE_PATH,
    DEFAULT_TIMEOUT_SECS,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-harvester",
    version,
    about = "Crawl websites from a seed list and harvest their PDF documents",
    long_about = "pdf-harvester walks each seed page and the same-site pages it links to, \
                  up to a fixed depth, and stores every PDF it finds exactly once per seed. \
                  The stored files feed a separate document indexing pipeline."
)]
pub struct Cli {
    /// Log format: text (default) or json
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log line format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl every seed and store the PDFs found
    ///
    /// Example: pdf-harvester crawl data/source.txt --levels 2
    Crawl(CrawlArgs),

    /// Show the PDF links and same-site page links of one page, download nothing
    ///
    /// Example: pdf-harvester links https://example.com/reports
    Links {
        /// Page URL to inspect
        url: String,

        /// Output results in JSON format instead of a list
        #[arg(long)]
        json: bool,

        /// Per-request timeout in seconds
        #[arg(long, env = "HARVEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Seed file (one URL per line) or a single URL starting with http.
    /// With --sink s3 the seed file is a key in the bucket.
    #[arg(env = "HARVEST_SOURCE", default_value = "data/source.txt")]
    pub source: String,

    /// How many page-to-page hops to follow from each seed
    ///
    /// 0 = only the PDFs linked from the seed page itself
    #[arg(long, env = "HARVEST_LEVELS", default_value_t = 0)]
    pub levels: u32,

    /// Directory the PDFs are written to (one numbered subfolder per seed
    /// when crawling a seed file)
    #[arg(long, env = "HARVEST_SAVE_PATH", default_value = DEFAULT_SAVE_PATH)]
    pub save_path: PathBuf,

    /// Where PDFs are stored: the local filesystem or an S3 bucket
    #[arg(long, value_enum, env = "HARVEST_SINK", default_value_t = SinkKind::Fs)]
    pub sink: SinkKind,

    /// Bucket for the s3 sink
    #[arg(long, env = "HARVEST_BUCKET")]
    pub bucket: Option<String>,

    /// Maximum concurrent downloads per page
    #[arg(long, env = "HARVEST_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "HARVEST_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "HARVEST_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Print the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CrawlArgs {
    /// Folds the arguments into a crawl configuration
    pub fn to_config(&self) -> CrawlConfig {
        CrawlConfig {
            levels: self.levels,
            save_path: self.save_path.clone(),
            sink: self.sink,
            bucket: self.bucket.clone(),
            concurrency: self.concurrency,
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crawl_defaults() {
        let cli = Cli::try_parse_from(["pdf-harvester", "crawl", "seeds.txt"]).unwrap();
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };

        assert_eq!(args.source, "seeds.txt");
        assert!(!args.json);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn test_crawl_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "pdf-harvester",
            "-vv",
            "--log-format",
            "json",
            "crawl",
            "https://example.com/reports",
            "--levels",
            "2",
            "--save-path",
            "/tmp/pdfs",
            "--concurrency",
            "3",
            "--timeout-secs",
            "5",
            "--user-agent",
            "test-agent",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);

        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };
        let config = args.to_config();
        assert_eq!(config.levels, 2);
        assert_eq!(config.save_path, PathBuf::from("/tmp/pdfs"));
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_s3_sink_flags() {
        let cli = Cli::try_parse_from([
            "pdf-harvester",
            "crawl",
            "seeds/source.txt",
            "--sink",
            "s3",
            "--bucket",
            "harvest-bucket",
        ])
        .unwrap();
        let Commands::Crawl(args) = cli.command else {
            panic!("expected crawl");
        };

        let config = args.to_config();
        assert_eq!(config.sink, SinkKind::S3);
        assert_eq!(config.bucket.as_deref(), Some("harvest-bucket"));
    }

    #[test]
    fn test_unknown_sink_is_rejected() {
        let result = Cli::try_parse_from(["pdf-harvester", "crawl", "--sink", "ftp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_links_command() {
        let cli =
            Cli::try_parse_from(["pdf-harvester", "links", "https://example.com", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Links { json: true, .. }));
    }
}
