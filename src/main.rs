//! Sitemapper command line
//!
//! Crawls a site from a root URL and writes its link structure to a text
//! file. Exit status is nonzero when the crawl could not run, when the
//! output file could not be written, or when --fail-with-warnings is set
//! and any page failed.

use anyhow::{bail, Context};
use clap::Parser;
use sitemapper::crawl;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemapper: map a website's internal links
///
/// Starting from --url, fetches every same-site page reachable through
/// anchor links (respecting robots.txt) and writes a sorted text sitemap.
#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(version)]
#[command(about = "Maps a website's internal link structure into a text sitemap", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(long)]
    url: String,

    /// File to write the sitemap to
    #[arg(long, default_value = "sitemap.txt")]
    filename: PathBuf,

    /// Number of simultaneous page fetches
    #[arg(long, default_value_t = 10)]
    parallelism: usize,

    /// Treat page-level warnings as fatal and write no sitemap
    #[arg(long)]
    fail_with_warnings: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Starting crawl of {}", cli.url);
    let report = match crawl(&cli.url, cli.parallelism).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if report.warnings > 0 {
        if cli.fail_with_warnings {
            bail!(
                "Crawl finished with {} warnings and --fail-with-warnings is set",
                report.warnings
            );
        }
        tracing::warn!(
            "Crawl finished with {} warnings, see the log above",
            report.warnings
        );
    }

    tracing::info!(
        "Writing sitemap of {} pages to {}",
        report.sitemap.len(),
        cli.filename.display()
    );

    let file = File::create(&cli.filename)
        .with_context(|| format!("Failed to create {}", cli.filename.display()))?;
    let mut out = BufWriter::new(file);
    report
        .sitemap
        .write(&mut out)
        .with_context(|| format!("Failed to write {}", cli.filename.display()))?;
    out.flush()
        .with_context(|| format!("Failed to write {}", cli.filename.display()))?;

    tracing::info!("Crawl complete");
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemapper=info,warn"),
            1 => EnvFilter::new("sitemapper=debug,info"),
            2 => EnvFilter::new("sitemapper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
