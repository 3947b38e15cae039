//! Sitegrazer: a single-site metadata crawler
//!
//! This crate crawls a website up to a bounded depth, extracts structured
//! metadata from every page it reaches (title, description, keywords, links,
//! images, last-modified timestamp), aggregates summary statistics, and
//! exports the results to CSV or JSON.

pub mod collect;
pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for sitegrazer operations
#[derive(Debug, Error)]
pub enum GrazeError {
    #[error("failed to fetch seed URL {url}: {source}")]
    Seed {
        url: String,
        #[source]
        source: Box<GrazeError>,
    },

    #[error("request for {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: ::url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for sitegrazer operations
pub type Result<T> = std::result::Result<T, GrazeError>;

// Re-export commonly used types
pub use collect::{Collector, CrawlOutcome};
pub use config::CrawlConfig;
pub use crawler::{Crawler, PageSink};
pub use output::ExportFormat;
pub use record::{CrawlStats, PageRecord};
