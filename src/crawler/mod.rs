//! Crawling pipeline: fetch, extract, deliver
//!
//! The pipeline per page is: fetch (`fetcher`), extract metadata into a
//! [`PageRecord`](crate::record::PageRecord) (`extractor`), then hand the
//! record to the injected [`PageSink`]. The driver (`driver`) owns the
//! traversal order, depth limit, and politeness pacing.

mod driver;
mod extractor;
mod fetcher;

pub use driver::Crawler;
pub use extractor::{extract_page, parse_last_modified};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};

use crate::record::PageRecord;
use crate::GrazeError;

/// Receiver for per-page crawl events
///
/// The driver never touches shared state directly; every successfully
/// fetched page and every fetch failure is delivered through this trait.
/// Production code injects the [`Collector`](crate::collect::Collector);
/// tests can inject anything else.
pub trait PageSink: Send + Sync {
    /// Called once per successfully fetched and extracted page
    fn on_page(&self, record: PageRecord);

    /// Called once per failed fetch; failures are never fatal to the crawl
    fn on_error(&self, url: &str, error: &GrazeError);
}
