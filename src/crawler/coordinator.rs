//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a single run:
//! - Fetching the seed page and recording it as the main page
//! - Extracting same-domain links from the seed page once
//! - Visiting each link in order, one at a time, with a pause in between
//! - Recording failed links as error pages without stopping the run
//! - Handing the ordered records to the report writer
//!
//! A seed failure aborts the run and no report is written. The browser is
//! closed exactly once when the run ends, whatever the outcome.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::{Browser, NavigationOptions, Page, ReadinessPolicy};
use crate::output::{CrawlRecord, CrawlStatistics, ReportWriter};
use crate::state::CrawlPhase;
use crate::url::{extract_same_domain_links, parse_seed};
use crate::{CrawlError, FetchError};
use chrono::Utc;
use std::future::Future;

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    /// Every record, in crawl order, as written to the report
    pub records: Vec<CrawlRecord>,

    /// Summary of the run
    pub statistics: CrawlStatistics,

    /// Where the report was written
    pub report_destination: String,
}

/// What the crawl keeps from the seed page
struct SeedPage {
    title: String,
    hrefs: Vec<String>,
    current_url: String,
}

/// Main crawler coordinator structure
pub struct Coordinator<B: Browser, W: ReportWriter> {
    browser: B,
    writer: W,
    config: CrawlerConfig,
    phase: CrawlPhase,
}

impl<B: Browser, W: ReportWriter> Coordinator<B, W> {
    /// Creates a new coordinator instance
    ///
    /// The coordinator takes ownership of the browser and closes it when
    /// the run ends.
    ///
    /// # Arguments
    ///
    /// * `browser` - Opens the page sessions used for every fetch
    /// * `writer` - Receives the records once the link loop is over
    /// * `config` - Timeouts and throttle delay
    pub fn new(browser: B, writer: W, config: CrawlerConfig) -> Self {
        Self {
            browser,
            writer,
            config,
            phase: CrawlPhase::Init,
        }
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Runs the crawl to completion
    pub async fn run(&mut self, seed: &str) -> Result<CrawlOutcome, CrawlError> {
        self.run_until(seed, std::future::pending()).await
    }

    /// Runs the crawl, stopping early if `shutdown` resolves first
    ///
    /// On shutdown the in-flight fetch is dropped, no report is written and
    /// `CrawlError::Interrupted` is returned. The browser is closed on every
    /// path.
    pub async fn run_until<F>(&mut self, seed: &str, shutdown: F) -> Result<CrawlOutcome, CrawlError>
    where
        F: Future<Output = ()>,
    {
        if self.phase != CrawlPhase::Init {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: CrawlPhase::FetchSeed,
            });
        }

        let outcome = tokio::select! {
            result = self.crawl(seed) => result,
            _ = shutdown => Err(CrawlError::Interrupted),
        };

        if matches!(outcome, Err(CrawlError::Interrupted)) && self.phase.can_interrupt() {
            tracing::warn!("Crawl interrupted during {}", self.phase);
            self.phase = CrawlPhase::Aborted;
        }

        self.browser.close().await;
        outcome
    }

    /// Walks the run through its phases
    async fn crawl(&mut self, seed: &str) -> Result<CrawlOutcome, CrawlError> {
        let started_at = Utc::now();

        let target_host = match parse_seed(seed) {
            Ok((_, host)) => host,
            Err(e) => {
                self.transition(CrawlPhase::Aborted)?;
                return Err(e);
            }
        };

        // Fetch the seed page; failure here is fatal
        self.transition(CrawlPhase::FetchSeed)?;
        tracing::info!("Starting crawl of {} (target host: {})", seed, target_host);

        let seed_page = match self.fetch_seed(seed).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Failed to load seed page {}: {}", seed, e);
                self.transition(CrawlPhase::Aborted)?;
                return Err(CrawlError::SeedFetch {
                    url: seed.to_string(),
                    source: e,
                });
            }
        };
        tracing::info!("Main page title: {}", seed_page.title);

        let mut records = vec![CrawlRecord::main_page(seed, seed_page.title)];

        // Extract links once; depth is exactly one
        self.transition(CrawlPhase::ExtractLinks)?;
        let links =
            extract_same_domain_links(&seed_page.hrefs, &target_host, &seed_page.current_url);
        tracing::info!("Found {} same-domain links", links.len());

        // Visit links strictly in order
        self.transition(CrawlPhase::CrawlLinks)?;
        let total = links.len();
        for (index, link) in links.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.throttle_delay()).await;
            }

            tracing::info!("[{}/{}] {}", index + 1, total, link);
            records.push(self.visit_link(link).await);
        }

        // Hand everything to the report writer
        self.transition(CrawlPhase::Finalize)?;
        let statistics = CrawlStatistics::from_records(&records, started_at, Utc::now());
        self.writer.write(&records)?;

        self.transition(CrawlPhase::Done)?;
        let failed = records.iter().filter(|r| r.kind.is_error()).count();
        tracing::info!(
            "Crawl completed: {} pages recorded ({} failed) in {:.1}s",
            records.len(),
            failed,
            statistics.duration_seconds()
        );

        Ok(CrawlOutcome {
            records,
            statistics,
            report_destination: self.writer.destination(),
        })
    }

    /// Loads the seed page with the browser's default navigation options
    async fn fetch_seed(&self, seed: &str) -> Result<SeedPage, FetchError> {
        let mut page = self.browser.new_page().await?;

        let result = match page.navigate(seed, &NavigationOptions::default()).await {
            Ok(title) => Ok(SeedPage {
                title,
                hrefs: page.anchor_hrefs(),
                current_url: page.current_url().unwrap_or(seed).to_string(),
            }),
            Err(e) => Err(e),
        };

        page.close().await;
        result
    }

    /// Fetches one discovered link and classifies the result
    ///
    /// Never fails: a fetch error becomes an error page record.
    async fn visit_link(&self, link: &str) -> CrawlRecord {
        let options = NavigationOptions::new(
            self.config.link_timeout(),
            ReadinessPolicy::NetworkAlmostIdle,
        );

        match self.fetch_title(link, &options).await {
            Ok(title) => {
                tracing::debug!("Title of {}: {}", link, title);
                CrawlRecord::sub_page(link, title)
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", link, e);
                CrawlRecord::error_page(link, &e)
            }
        }
    }

    /// Opens a page, navigates, and closes the page again on every path
    async fn fetch_title(
        &self,
        url: &str,
        options: &NavigationOptions,
    ) -> Result<String, FetchError> {
        let mut page = self.browser.new_page().await?;
        let result = page.navigate(url, options).await;
        page.close().await;
        result
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), CrawlError> {
        if !self.phase.can_transition_to(next) {
            return Err(CrawlError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::debug!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}
