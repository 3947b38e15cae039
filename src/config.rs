//! Crawl configuration
//!
//! The configuration is assembled from command-line flags (see `main.rs`)
//! and validated here before the crawler starts.

use crate::{GrazeError, Result};
use std::time::Duration;
use url::Url;

/// Default per-request politeness delay
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Default upper bound for the randomized jitter added to the delay
pub const DEFAULT_JITTER: Duration = Duration::from_millis(500);

/// Upper bound on concurrent fetches, regardless of what was requested
const MAX_CONCURRENCY: usize = 64;

/// Validated configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The starting point of the crawl
    pub seed: Url,

    /// Number of link-following hops from the seed; 0 visits only the seed
    pub max_depth: u32,

    /// Maximum number of fetches in flight at once (clamped to 1..=64)
    pub concurrency: usize,

    /// Fixed pause before each request
    pub delay: Duration,

    /// Random extra pause in `0..=jitter` added to `delay` per request
    pub jitter: Duration,
}

impl CrawlConfig {
    /// Builds a configuration, parsing and validating the seed URL
    ///
    /// The requested concurrency is clamped to at least 1 and at most 64.
    pub fn new(seed: &str, max_depth: u32, concurrency: usize) -> Result<Self> {
        let seed = Url::parse(seed).map_err(|source| GrazeError::InvalidUrl {
            url: seed.to_string(),
            source,
        })?;

        Ok(Self {
            seed,
            max_depth,
            concurrency: concurrency.clamp(1, MAX_CONCURRENCY),
            delay: DEFAULT_DELAY,
            jitter: DEFAULT_JITTER,
        })
    }

    /// Overrides the politeness delay and jitter (used by tests to avoid
    /// real sleeps)
    pub fn with_politeness(mut self, delay: Duration, jitter: Duration) -> Self {
        self.delay = delay;
        self.jitter = jitter;
        self
    }
}
