//! Crawl driver - traversal orchestration
//!
//! The driver owns the traversal: breadth-first by depth level from the
//! seed, a visited set so no URL is fetched twice, a semaphore bounding
//! concurrent fetches, and a politeness pause (fixed delay plus randomized
//! jitter) before every request. Page results and fetch failures are
//! delivered through the injected [`PageSink`]; the driver itself holds no
//! result state.
//!
//! Lifecycle: `crawl` fetches the seed (fatal on failure, before any record
//! exists), walks the frontier level by level, and returns the elapsed
//! wall-clock time once every in-flight task has joined. Per-page failures
//! only reduce the eventual page count.

use crate::config::CrawlConfig;
use crate::crawler::{build_http_client, extract_page, fetch_page, PageSink};
use crate::{GrazeError, Result};
use rand::Rng;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Depth-bounded crawler for a single seed URL
pub struct Crawler {
    config: CrawlConfig,
    client: Client,
}

impl Crawler {
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = build_http_client()?;
        Ok(Self { config, client })
    }

    /// Runs the crawl to completion
    ///
    /// Fetches the seed first; any failure there is fatal and surfaces as
    /// [`GrazeError::Seed`] before a single record exists. Every page
    /// reached within `max_depth` hops goes through fetch -> extract ->
    /// `sink.on_page`; failed fetches go to `sink.on_error` and the crawl
    /// continues. Returns the elapsed wall-clock time after all fetch tasks
    /// have joined.
    pub async fn crawl(&self, sink: Arc<dyn PageSink>) -> Result<Duration> {
        let start = Instant::now();
        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(self.config.seed.to_string());

        tracing::info!("Visiting {}", self.config.seed);
        let seed_page = fetch_page(&self.client, self.config.seed.clone())
            .await
            .map_err(|source| GrazeError::Seed {
                url: self.config.seed.to_string(),
                source: Box::new(source),
            })?;

        let mut frontier: Vec<Url> = Vec::new();
        if let Some(page) = seed_page {
            let record = extract_page(&page.body, &page.final_url, page.last_modified);
            frontier = resolve_links(&record.links, &page.final_url);
            sink.on_page(record);
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency));

        for depth in 1..=self.config.max_depth {
            let level: Vec<Url> = frontier
                .drain(..)
                .filter(|url| visited.insert(url.to_string()))
                .collect();
            if level.is_empty() {
                break;
            }
            tracing::debug!("Depth {}: {} URLs queued", depth, level.len());

            let mut tasks = JoinSet::new();
            for url in level {
                let client = self.client.clone();
                let sink = Arc::clone(&sink);
                let semaphore = Arc::clone(&semaphore);
                let delay = self.config.delay;
                let jitter = self.config.jitter;

                tasks.spawn(async move {
                    let Ok(_permit) = semaphore.acquire_owned().await else {
                        return Vec::new();
                    };
                    politeness_pause(delay, jitter).await;

                    tracing::info!("Visiting {}", url);
                    match fetch_page(&client, url.clone()).await {
                        Ok(Some(page)) => {
                            let record =
                                extract_page(&page.body, &page.final_url, page.last_modified);
                            let discovered = resolve_links(&record.links, &page.final_url);
                            sink.on_page(record);
                            discovered
                        }
                        Ok(None) => Vec::new(),
                        Err(error) => {
                            sink.on_error(url.as_str(), &error);
                            Vec::new()
                        }
                    }
                });
            }

            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(discovered) => frontier.extend(discovered),
                    Err(e) => tracing::error!("Fetch task failed: {}", e),
                }
            }
        }

        Ok(start.elapsed())
    }
}

/// Sleeps for the configured delay plus a random jitter in `0..=jitter`
async fn politeness_pause(delay: Duration, jitter: Duration) {
    let jitter_ms = jitter.as_millis() as u64;
    let extra = if jitter_ms == 0 {
        0
    } else {
        rand::rng().random_range(0..=jitter_ms)
    };
    let pause = delay + Duration::from_millis(extra);
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }
}

/// Resolves raw hrefs against the page URL into crawlable targets
///
/// Skips non-navigational hrefs (javascript:, mailto:, tel:, data:,
/// fragment-only) and anything that does not resolve to http/https.
fn resolve_links(hrefs: &[String], base: &Url) -> Vec<Url> {
    hrefs
        .iter()
        .filter_map(|href| resolve_link(href, base))
        .collect()
}

fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}
