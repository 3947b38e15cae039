//! File export for crawl results
//!
//! Two formats, one per invocation:
//! * CSV - one row per record in crawl order, list fields joined with `|`.
//!   Stats are not included.
//! * JSON - a single `{"data": [...], "stats": {...}}` object,
//!   pretty-printed with two-space indentation.
//!
//! Field names and ordering are a compatibility contract for downstream
//! consumers. Any failure to create or write the file is fatal to the run.

use crate::collect::CrawlOutcome;
use crate::record::PageRecord;
use crate::Result;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// CSV header row; column order matches the row writer below
const CSV_HEADERS: [&str; 7] = [
    "URL",
    "Title",
    "Description",
    "Keywords",
    "Links",
    "Images",
    "Last Modified",
];

/// Export format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Appends the format extension to the output base name
pub fn output_path(base: &str, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!("{}.{}", base, format.extension()))
}

/// Writes the outcome to `<base>.<ext>` in the chosen format
///
/// Returns the path written. CSV export writes records only; JSON export
/// includes the finalized stats.
pub fn export(outcome: &CrawlOutcome, base: &str, format: ExportFormat) -> Result<PathBuf> {
    let path = output_path(base, format);
    match format {
        ExportFormat::Csv => export_csv(&path, &outcome.records)?,
        ExportFormat::Json => export_json(&path, outcome)?,
    }
    Ok(path)
}

/// Writes records as CSV with a fixed header row
///
/// `keywords`, `links`, and `images` are joined with `|`; the timestamp is
/// RFC 3339.
pub fn export_csv(path: &Path, records: &[PageRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;

    for record in records {
        writer.write_record([
            record.url.as_str(),
            record.title.as_str(),
            record.description.as_str(),
            &record.keywords.join("|"),
            &record.links.join("|"),
            &record.images.join("|"),
            &record.last_modified.to_rfc3339(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the full outcome as pretty-printed JSON
pub fn export_json(path: &Path, outcome: &CrawlOutcome) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), outcome)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CrawlStats;
    use chrono::{DateTime, TimeZone, Utc};
    use std::time::Duration;

    fn sample_outcome() -> CrawlOutcome {
        let records = vec![
            PageRecord {
                url: "https://example.com/".to_string(),
                title: "Home".to_string(),
                description: "The home page".to_string(),
                keywords: vec!["a".to_string(), "b".to_string()],
                links: vec!["/one".to_string(), "/two".to_string()],
                images: vec!["/logo.png".to_string()],
                last_modified: Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap(),
            },
            PageRecord {
                url: "https://example.com/one".to_string(),
                title: String::new(),
                description: String::new(),
                keywords: vec![],
                links: vec![],
                images: vec![],
                last_modified: DateTime::UNIX_EPOCH,
            },
        ];

        let mut stats = CrawlStats {
            total_pages: 2,
            total_links: 2,
            total_images: 1,
            average_keywords_per_page: 1.0,
            execution_duration: Duration::from_secs(3),
            ..Default::default()
        };
        stats.domain_counts.insert("example.com".to_string(), 2);

        CrawlOutcome { records, stats }
    }

    #[test]
    fn csv_has_header_and_joined_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        export_csv(&path, &sample_outcome().records).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "URL,Title,Description,Keywords,Links,Images,Last Modified"
        );
        let first = lines.next().unwrap();
        assert!(first.contains("a|b"));
        assert!(first.contains("/one|/two"));
        assert!(first.contains("2015-10-21T07:28:00+00:00"));
    }

    #[test]
    fn re_export_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = sample_outcome();

        let csv_a = dir.path().join("a.csv");
        let csv_b = dir.path().join("b.csv");
        export_csv(&csv_a, &outcome.records).unwrap();
        export_csv(&csv_b, &outcome.records).unwrap();
        assert_eq!(std::fs::read(&csv_a).unwrap(), std::fs::read(&csv_b).unwrap());

        let json_a = dir.path().join("a.json");
        let json_b = dir.path().join("b.json");
        export_json(&json_a, &outcome).unwrap();
        export_json(&json_b, &outcome).unwrap();
        assert_eq!(
            std::fs::read(&json_a).unwrap(),
            std::fs::read(&json_b).unwrap()
        );
    }

    #[test]
    fn json_round_trip_reconstructs_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let outcome = sample_outcome();

        export_json(&path, &outcome).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Pretty printing uses two-space indentation.
        assert!(content.contains("\n  \"data\""));

        let back: CrawlOutcome = serde_json::from_str(&content).unwrap();
        assert_eq!(back.records, outcome.records);
        assert_eq!(back.stats.total_pages, outcome.stats.total_pages);
        assert_eq!(
            back.stats.domain_counts["example.com"],
            outcome.stats.domain_counts["example.com"]
        );
    }

    #[test]
    fn export_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("scraped_data");
        let base = base.to_str().unwrap();

        let path = export(&sample_outcome(), base, ExportFormat::Json).unwrap();
        assert!(path.to_str().unwrap().ends_with("scraped_data.json"));
        assert!(path.exists());
    }

    #[test]
    fn export_to_unwritable_path_fails() {
        let outcome = sample_outcome();
        let err = export(&outcome, "/nonexistent-dir/scraped_data", ExportFormat::Csv);
        assert!(err.is_err());
    }
}
