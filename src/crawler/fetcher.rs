//! HTTP fetcher
//!
//! Builds the shared HTTP client and performs single-page GETs. Redirects
//! are followed by the client; the final URL after redirects is what ends
//! up in the record. Non-HTML responses are skipped, not errors.

use crate::crawler::parse_last_modified;
use crate::{GrazeError, Result};
use chrono::{DateTime, Utc};
use reqwest::header::{CONTENT_TYPE, LAST_MODIFIED};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// User agent sent with every request
const USER_AGENT: &str = concat!("sitegrazer/", env!("CARGO_PKG_VERSION"));

/// A successfully fetched HTML page, ready for extraction
#[derive(Debug)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub final_url: Url,

    /// Raw HTML body
    pub body: String,

    /// Parsed `Last-Modified` response header, `None` when missing or
    /// malformed
    pub last_modified: Option<DateTime<Utc>>,
}

/// Builds the HTTP client shared by all fetch tasks
pub fn build_http_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;
    Ok(client)
}

/// Fetches a single URL
///
/// Returns:
/// * `Ok(Some(page))` - HTML page fetched successfully
/// * `Ok(None)` - the response was not HTML and was skipped
/// * `Err(_)` - network failure or non-2xx status
pub async fn fetch_page(client: &Client, url: Url) -> Result<Option<FetchedPage>> {
    let url_str = url.to_string();

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| GrazeError::Http {
            url: url_str.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GrazeError::Status {
            url: url_str,
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.contains("text/html") {
        tracing::debug!("Skipping {} (content-type: {})", url_str, content_type);
        return Ok(None);
    }

    // Headers must be read before the body consumes the response.
    let last_modified =
        parse_last_modified(response.headers().get(LAST_MODIFIED).and_then(|v| v.to_str().ok()));
    if last_modified.is_none() && response.headers().contains_key(LAST_MODIFIED) {
        tracing::debug!("Malformed Last-Modified header on {}", url_str);
    }

    let final_url = response.url().clone();
    let body = response.text().await.map_err(|source| GrazeError::Http {
        url: url_str,
        source,
    })?;

    Ok(Some(FetchedPage {
        final_url,
        body,
        last_modified,
    }))
}
