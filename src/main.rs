//! Sitegrazer main entry point
//!
//! Command-line interface for the sitegrazer metadata crawler.

use clap::Parser;
use sitegrazer::output::{export, print_summary};
use sitegrazer::{Collector, CrawlConfig, Crawler, ExportFormat, PageSink};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Crawl a website and export page metadata to CSV or JSON
#[derive(Parser, Debug)]
#[command(name = "sitegrazer")]
#[command(version)]
#[command(about = "A single-site metadata crawler", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(long, default_value = "https://example.com")]
    url: String,

    /// Output file base name (extension appended per format)
    #[arg(long, default_value = "scraped_data")]
    output: String,

    /// Maximum crawl depth (0 visits only the seed)
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Export format
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Maximum number of concurrent fetches
    #[arg(long, default_value_t = 2)]
    concurrency: usize,

    /// Increase logging verbosity (-v, -vv)
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

    let config = CrawlConfig::new(&cli.url, cli.depth, cli.concurrency)?;
    tracing::info!(
        "Starting crawl of {} (depth {}, concurrency {})",
        config.seed,
        config.max_depth,
        config.concurrency
    );

    let crawler = Crawler::new(config)?;
    let collector = Arc::new(Collector::new());
    let sink: Arc<dyn PageSink> = collector.clone();

    let elapsed = match crawler.crawl(sink).await {
        Ok(elapsed) => elapsed,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let outcome = collector.finalize(elapsed);
    tracing::info!(
        "Crawl completed: {} pages in {:.2?}",
        outcome.stats.total_pages,
        outcome.stats.execution_duration
    );

    let path = match export(&outcome, &cli.output, cli.format) {
        Ok(path) => path,
        Err(e) => {
            tracing::error!("Export failed: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Results written to {}", path.display());

    print_summary(&outcome.stats);

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegrazer=info,warn"),
            1 => EnvFilter::new("sitegrazer=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
