//! Console summary of finalized crawl statistics

use crate::record::CrawlStats;

/// Prints the finalized stats to stdout
///
/// Pure read of an already-frozen [`CrawlStats`]; domains are sorted by
/// page count (descending, then name) so repeated runs over the same data
/// print in a stable order.
pub fn print_summary(stats: &CrawlStats) {
    println!("=== Crawl Summary ===\n");

    println!("Total pages:  {}", stats.total_pages);
    println!("Total links:  {}", stats.total_links);
    println!("Total images: {}", stats.total_images);
    println!(
        "Average keywords per page: {:.2}",
        stats.average_keywords_per_page
    );

    if !stats.domain_counts.is_empty() {
        println!("\nPages per domain:");
        let mut domains: Vec<_> = stats.domain_counts.iter().collect();
        domains.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (domain, count) in domains {
            let label = if domain.is_empty() { "(unknown)" } else { domain };
            println!("  {}: {}", label, count);
        }
    }

    println!("\nExecution time: {:.2?}", stats.execution_duration);
}
