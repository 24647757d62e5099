// src/logging.rs
// =============================================================================
// Sets up tracing.
//
// - Default level is info for this crate, -v gives debug, -vv trace
// - RUST_LOG overrides the default filter entirely
// - Text or JSON lines, always on stderr so stdout stays free for the report
// =============================================================================

use crate::cli::LogFormat;
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber; call once, early in main
pub fn init(verbose: u8, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    match format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "pdf_harvester=info",
        1 => "pdf_harvester=debug",
        _ => "pdf_harvester=trace",
    }
}
