//! CSV report generation
//!
//! Every field is double-quoted, embedded quotes are doubled, and rows end
//! with `\n`.

use crate::output::traits::{CrawlRecord, OutputResult, ReportWriter};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Column names of the report, in order
pub const REPORT_HEADER: [&str; 3] = ["URL", "Title", "PageType"];

/// Writes records as CSV to any writer
///
/// # Arguments
///
/// * `records` - The crawl records in discovery order
/// * `writer` - Where the CSV text goes
///
/// # Example
///
/// ```
/// use crowl::output::{write_csv, CrawlRecord};
///
/// let records = vec![CrawlRecord::main_page("https://example.com", "He said \"hi\"")];
/// let mut buf = Vec::new();
/// write_csv(&records, &mut buf).unwrap();
///
/// let text = String::from_utf8(buf).unwrap();
/// assert_eq!(
///     text,
///     "\"URL\",\"Title\",\"PageType\"\n\"https://example.com\",\"He said \"\"hi\"\"\",\"MainPage\"\n"
/// );
/// ```
pub fn write_csv<W: Write>(records: &[CrawlRecord], writer: W) -> OutputResult<()> {
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(REPORT_HEADER)?;

    for record in records {
        csv_writer.write_record([
            record.url.as_str(),
            record.title.as_str(),
            record.kind.label(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Report writer that saves the CSV to a file, replacing any existing one
#[derive(Debug, Clone)]
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ReportWriter for CsvReportWriter {
    fn write(&self, records: &[CrawlRecord]) -> OutputResult<()> {
        let file = File::create(&self.path)?;
        write_csv(records, file)?;
        tracing::info!(
            "Wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}
