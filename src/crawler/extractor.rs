//! Page metadata extraction
//!
//! Turns a fetched HTML document into a [`PageRecord`]. Pure and
//! deterministic: the same document always produces the same record, and
//! missing metadata degrades to empty values rather than errors.

use crate::record::PageRecord;
use chrono::{DateTime, Utc};
use scraper::{Html, Selector};
use url::Url;

/// Extracts a [`PageRecord`] from an HTML document
///
/// * Title: text of the first `<title>`, trimmed, empty if absent.
/// * Description: `content` of the first `meta[name=description]`.
/// * Keywords: `content` of the first `meta[name=keywords]`, comma-split
///   and trimmed. An absent or blank tag yields an empty vector, and empty
///   pieces left by stray commas are dropped; this is the documented
///   contract for the keywords field.
/// * Links/images: raw `href`/`src` values in document order, excluding
///   empty values. No URL resolution happens here; hrefs are recorded as
///   written.
/// * Last-Modified: the already-parsed header value, Unix epoch when absent.
pub fn extract_page(html: &str, url: &Url, last_modified: Option<DateTime<Utc>>) -> PageRecord {
    let document = Html::parse_document(html);

    PageRecord {
        url: url.to_string(),
        title: extract_title(&document),
        description: extract_meta_content(&document, "description").unwrap_or_default(),
        keywords: split_keywords(extract_meta_content(&document, "keywords").as_deref()),
        links: extract_attr_values(&document, "a[href]", "href"),
        images: extract_attr_values(&document, "img[src]", "src"),
        last_modified: last_modified.unwrap_or(DateTime::UNIX_EPOCH),
    }
}

/// Parses a `Last-Modified` header value in the HTTP-date wire format
///
/// Returns `None` for a missing or malformed header; the decision to treat
/// absence as the epoch is made by the caller, not hidden here.
pub fn parse_last_modified(header: Option<&str>) -> Option<DateTime<Utc>> {
    let value = header?;
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_meta_content(document: &Html, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

fn split_keywords(content: Option<&str>) -> Vec<String> {
    match content {
        Some(raw) if !raw.trim().is_empty() => raw
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn extract_attr_values(document: &Html, css: &str, attr: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(css) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
