//! Data model for extracted pages and aggregate statistics
//!
//! The field names used on the wire (JSON export) are part of the
//! compatibility contract: `PageRecord` serializes with camelCase keys
//! (`lastModified`, etc.) and `CrawlStats` likewise (`totalPages`,
//! `domainCounts`, ...).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Metadata extracted from a single successfully fetched page
///
/// A record is created exactly once per page and never mutated afterward.
/// Missing metadata degrades to empty values rather than errors: a page
/// without a `<title>` yields an empty string, a page without a keywords
/// meta tag yields an empty vector, and a missing or malformed
/// `Last-Modified` header yields the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Canonical fetched URL (final URL after redirects)
    pub url: String,

    /// Page title, empty if absent
    pub title: String,

    /// Meta-description content, empty if absent
    pub description: String,

    /// Meta-keywords, comma-split and trimmed; empty when the tag is absent
    /// or blank, and stray empty pieces are dropped
    pub keywords: Vec<String>,

    /// Raw `href` values of anchor elements, in document order, excluding
    /// empty values
    pub links: Vec<String>,

    /// Raw `src` values of image elements, same rules as links
    pub images: Vec<String>,

    /// Parsed `Last-Modified` response header; Unix epoch when the header
    /// is missing or malformed
    pub last_modified: DateTime<Utc>,
}

/// Aggregate statistics for a crawl run
///
/// Mutable while the crawl is in flight (always under the [`Collector`] lock,
/// see `collect.rs`), frozen at finalization. `average_keywords_per_page`
/// and `execution_duration` stay zero until then.
///
/// [`Collector`]: crate::collect::Collector
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlStats {
    pub total_pages: u64,
    pub total_links: u64,
    pub total_images: u64,

    /// Pages per hostname; URLs without an extractable host are counted
    /// under the empty-string bucket
    pub domain_counts: HashMap<String, u64>,

    /// Total keywords across all records divided by total pages, 0.0 when
    /// no pages were recorded; computed once after crawl completion
    pub average_keywords_per_page: f64,

    /// Wall-clock time from crawl start to completion, serialized as
    /// fractional seconds
    #[serde(with = "duration_secs")]
    pub execution_duration: Duration,
}

/// Serializes a `Duration` as fractional seconds (f64)
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        value.as_secs_f64().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
