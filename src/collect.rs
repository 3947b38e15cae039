//! Shared result store and statistics aggregator
//!
//! The [`Collector`] is the only shared mutable state in a crawl. A single
//! mutex guards both the record list and the running statistics so the two
//! can never drift apart: `total_pages` always equals the number of stored
//! records, no matter how fetch completions interleave.

use crate::crawler::PageSink;
use crate::record::{CrawlStats, PageRecord};
use crate::GrazeError;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

/// The finalized, immutable result of a crawl run
///
/// Serializes as `{"data": [...], "stats": {...}}`, the shape of the JSON
/// export.
#[derive(Debug, Serialize, Deserialize)]
pub struct CrawlOutcome {
    #[serde(rename = "data")]
    pub records: Vec<PageRecord>,
    pub stats: CrawlStats,
}

#[derive(Debug, Default)]
struct CollectorInner {
    records: Vec<PageRecord>,
    stats: CrawlStats,
}

/// Thread-safe accumulator for page records and crawl statistics
///
/// Fetch tasks call [`record`](Collector::record) concurrently; each call
/// appends the record and updates every counter inside one critical section.
/// After the crawl driver has joined all tasks,
/// [`finalize`](Collector::finalize) computes the derived statistics exactly
/// once and freezes the result.
#[derive(Debug, Default)]
pub struct Collector {
    inner: Mutex<CollectorInner>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one extracted page
    ///
    /// Appends the record to the result store and updates the running sums
    /// and per-domain counts atomically. Cannot fail: a URL without an
    /// extractable hostname is counted under the empty-string bucket.
    pub fn record(&self, page: PageRecord) {
        let mut inner = self.inner.lock().unwrap();

        inner.stats.total_pages += 1;
        inner.stats.total_links += page.links.len() as u64;
        inner.stats.total_images += page.images.len() as u64;

        let host = host_of(&page.url);
        *inner.stats.domain_counts.entry(host).or_insert(0) += 1;

        inner.records.push(page);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freezes the collected data into an immutable [`CrawlOutcome`]
    ///
    /// Computes `average_keywords_per_page` (0.0 when no pages were
    /// recorded) and stamps the wall-clock duration. Called exactly once,
    /// after the crawl driver reports completion.
    pub fn finalize(&self, elapsed: Duration) -> CrawlOutcome {
        let mut inner = self.inner.lock().unwrap();
        let CollectorInner { records, mut stats } = std::mem::take(&mut *inner);

        let total_keywords: usize = records.iter().map(|r| r.keywords.len()).sum();
        stats.average_keywords_per_page = if records.is_empty() {
            0.0
        } else {
            total_keywords as f64 / records.len() as f64
        };
        stats.execution_duration = elapsed;

        CrawlOutcome { records, stats }
    }
}

impl PageSink for Collector {
    fn on_page(&self, record: PageRecord) {
        self.record(record);
    }

    fn on_error(&self, url: &str, error: &GrazeError) {
        // Failed pages contribute nothing beyond a log line.
        tracing::warn!("Error scraping {}: {}", url, error);
    }
}

/// Extracts the hostname from a URL string, empty string on failure
fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::sync::Arc;

    fn test_record(url: &str, links: usize, images: usize, keywords: usize) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: "t".to_string(),
            description: String::new(),
            keywords: (0..keywords).map(|i| format!("k{i}")).collect(),
            links: (0..links).map(|i| format!("/l{i}")).collect(),
            images: (0..images).map(|i| format!("/i{i}.png")).collect(),
            last_modified: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn record_keeps_counters_consistent() {
        let collector = Collector::new();
        collector.record(test_record("https://example.com/a", 3, 1, 2));
        collector.record(test_record("https://example.com/b", 2, 0, 4));
        collector.record(test_record("https://other.org/", 0, 5, 0));

        let outcome = collector.finalize(Duration::from_secs(1));
        assert_eq!(outcome.stats.total_pages, 3);
        assert_eq!(outcome.stats.total_pages as usize, outcome.records.len());
        assert_eq!(outcome.stats.total_links, 5);
        assert_eq!(outcome.stats.total_images, 6);
        assert_eq!(outcome.stats.domain_counts["example.com"], 2);
        assert_eq!(outcome.stats.domain_counts["other.org"], 1);
        assert_eq!(
            outcome.stats.domain_counts.values().sum::<u64>(),
            outcome.stats.total_pages
        );
        assert_eq!(outcome.stats.average_keywords_per_page, 2.0);
    }

    #[test]
    fn finalize_with_no_pages_has_zero_average() {
        let collector = Collector::new();
        let outcome = collector.finalize(Duration::from_millis(10));
        assert_eq!(outcome.stats.total_pages, 0);
        assert_eq!(outcome.stats.average_keywords_per_page, 0.0);
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn malformed_url_counts_in_empty_bucket() {
        let collector = Collector::new();
        collector.record(test_record("not a url", 0, 0, 0));

        let outcome = collector.finalize(Duration::ZERO);
        assert_eq!(outcome.stats.domain_counts[""], 1);
        assert_eq!(outcome.stats.total_pages, 1);
    }

    #[tokio::test]
    async fn concurrent_records_never_lose_updates() {
        let collector = Arc::new(Collector::new());
        let n = 64;

        let mut handles = Vec::new();
        for i in 0..n {
            let collector = Arc::clone(&collector);
            handles.push(tokio::spawn(async move {
                collector.record(test_record(&format!("https://example.com/{i}"), 1, 1, 1));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let outcome = collector.finalize(Duration::from_secs(1));
        assert_eq!(outcome.stats.total_pages, n);
        assert_eq!(outcome.records.len(), n as usize);
        assert_eq!(outcome.stats.total_links, n);
        assert_eq!(outcome.stats.domain_counts.values().sum::<u64>(), n);
    }

    #[test]
    fn host_of_handles_bad_input() {
        assert_eq!(host_of("https://example.com/page"), "example.com");
        assert_eq!(host_of("::not-a-url::"), "");
        assert_eq!(host_of("data:text/plain,hello"), "");
    }
}
