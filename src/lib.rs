//! Crowl: a one-level, same-domain site crawler
//!
//! This crate loads a seed page, collects every link on it that points back to
//! the same host, visits each of those links one at a time to read its title,
//! and writes the results to a CSV report.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl run
///
/// Every variant here is fatal to the run. Per-link failures are reported as
/// [`FetchError`] and recorded in the report instead of being raised.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Failed to load seed page {url}: {source}")]
    SeedFetch { url: String, source: FetchError },

    #[error("Failed to start browser: {0}")]
    Browser(String),

    #[error("Failed to write report: {0}")]
    Report(#[from] output::OutputError),

    #[error("Crawl interrupted")]
    Interrupted,

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Errors raised while navigating a single page
///
/// The `Display` output is the message that ends up in the report's title
/// column for error pages, so it stays short and human-readable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Navigation timeout of {timeout_ms} ms exceeded")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    #[error("{message}")]
    Navigation { url: String, message: String },

    #[error("Page session error: {0}")]
    Session(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlOutcome, HttpBrowser};
pub use output::{CrawlRecord, CsvReportWriter, ReportWriter};
pub use state::{CrawlPhase, PageKind};
pub use url::{extract_domain, extract_same_domain_links};
