//! Output module for crawl reports
//!
//! This module handles:
//! - The record type collected for every crawled page
//! - Writing the ordered records to a CSV report
//! - Summarizing a run for the console

mod csv_report;
pub mod stats;
mod traits;

pub use csv_report::{write_csv, CsvReportWriter, REPORT_HEADER};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{CrawlRecord, OutputError, OutputResult, ReportWriter};
