//! Report writer trait and record types
//!
//! This module defines the trait interface for report writers and the
//! record collected for each crawled page.

use crate::state::PageKind;
use crate::FetchError;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One row of the crawl report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRecord {
    /// Absolute URL of the page
    pub url: String,

    /// Page title, or `Error: <message>` when the fetch failed
    pub title: String,

    /// Classification of the page
    pub kind: PageKind,
}

impl CrawlRecord {
    /// Record for the seed page
    pub fn main_page(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            kind: PageKind::MainPage,
        }
    }

    /// Record for a link that loaded successfully
    pub fn sub_page(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            kind: PageKind::SubPage,
        }
    }

    /// Record for a link whose fetch failed
    pub fn error_page(url: impl Into<String>, error: &FetchError) -> Self {
        Self {
            url: url.into(),
            title: format!("Error: {}", error),
            kind: PageKind::ErrorPage,
        }
    }
}

/// Trait for report writers
///
/// Writers are stateless with respect to the crawl: they receive the full,
/// ordered record list once the crawl loop is over.
pub trait ReportWriter {
    /// Writes every record, in order, to the writer's destination
    ///
    /// # Arguments
    ///
    /// * `records` - The crawl records in discovery order
    fn write(&self, records: &[CrawlRecord]) -> OutputResult<()>;

    /// Human-readable name of the destination, for console output
    fn destination(&self) -> String;
}
