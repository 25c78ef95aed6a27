//! Run statistics
//!
//! This module summarizes a finished crawl for the console.

use crate::output::traits::CrawlRecord;
use crate::state::PageKind;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the link loop finished
    pub finished_at: DateTime<Utc>,

    /// Number of same-domain links found on the seed page
    pub links_discovered: u64,

    /// Count of records by kind
    pub records_by_kind: HashMap<PageKind, u64>,
}

impl CrawlStatistics {
    /// Builds statistics from the ordered record list of a run
    pub fn from_records(
        records: &[CrawlRecord],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let mut records_by_kind = HashMap::new();
        for record in records {
            *records_by_kind.entry(record.kind).or_insert(0) += 1;
        }

        let links_discovered = records.iter().filter(|r| !r.kind.is_main()).count() as u64;

        Self {
            started_at,
            finished_at,
            links_discovered,
            records_by_kind,
        }
    }

    /// Number of records of the given kind
    pub fn count(&self, kind: PageKind) -> u64 {
        self.records_by_kind.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of report rows
    pub fn total_records(&self) -> u64 {
        self.records_by_kind.values().sum()
    }

    /// Wall-clock duration of the run in seconds
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Returns the share of discovered links that loaded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.links_discovered == 0 {
            return 0.0;
        }
        (self.count(PageKind::SubPage) as f64 / self.links_discovered as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Duration: {:.1}s", stats.duration_seconds());
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Report rows: {}", stats.total_records());
    println!();

    println!("Pages by Type:");
    for kind in PageKind::all_kinds() {
        println!("  {}: {}", kind, stats.count(kind));
    }
    println!();

    if stats.links_discovered > 0 {
        println!("  Success rate: {:.1}%", stats.success_rate());
        println!();
    }
}
