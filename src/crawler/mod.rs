//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The browser/page boundary and its HTTP implementation
//! - HTML parsing for titles and anchors
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{
    build_http_client, Browser, HttpBrowser, HttpPage, NavigationOptions, Page, ReadinessPolicy,
};
pub use parser::{parse_html, ParsedPage};

use crate::config::Config;
use crate::output::CsvReportWriter;
use crate::CrawlError;

/// Runs a complete crawl of `seed`
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP browser
/// 2. Fetch the seed page and extract its same-domain links
/// 3. Visit every link in order, pausing between them
/// 4. Write the CSV report to the configured path
///
/// Ctrl-C stops the run: the browser is closed and no report is written.
///
/// # Arguments
///
/// * `seed` - The URL to start from
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed and the report was written
/// * `Err(CrawlError)` - Crawl failed with an error
///
/// # Example
///
/// ```no_run
/// use crowl::config::Config;
/// use crowl::crawler::crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = crawl("https://example.com", Config::default()).await?;
/// println!("{} rows written", outcome.records.len());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seed: &str, config: Config) -> Result<CrawlOutcome, CrawlError> {
    let browser = HttpBrowser::new(&config)?;
    let writer = CsvReportWriter::new(&config.output.report_path);
    let mut coordinator = Coordinator::new(browser, writer, config.crawler);

    coordinator.run_until(seed, interrupt_signal()).await
}

/// Resolves when the user presses Ctrl-C
///
/// If the signal handler cannot be installed the future never resolves, so
/// the crawl simply runs without interrupt support.
async fn interrupt_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
