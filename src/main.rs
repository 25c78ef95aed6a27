//! Crowl main entry point
//!
//! This is the command-line interface for the Crowl site crawler.

use anyhow::Context;
use clap::Parser;
use crowl::config::{config_path_from_env, load_config_or_default};
use crowl::crawler::crawl;
use crowl::output::print_statistics;
use crowl::CrawlError;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Crowl: a one-level, same-domain site crawler
///
/// Crowl loads the given page, visits every link on it that stays on the
/// same host, and writes each page's URL, title and type to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "crowl")]
#[command(version)]
#[command(about = "A one-level, same-domain site crawler", long_about = None)]
struct Cli {
    /// URL of the page to start crawling from
    #[arg(value_name = "URL")]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(seed) = cli.url else {
        print_usage();
        return ExitCode::FAILURE;
    };

    setup_logging();

    match run(&seed).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if matches!(e.downcast_ref::<CrawlError>(), Some(CrawlError::Interrupted)) {
                eprintln!("Crawl interrupted, no report written");
                return ExitCode::from(130);
            }

            tracing::error!("Crawl failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Prints usage and an example to stdout
fn print_usage() {
    println!("Usage: crowl <URL>");
    println!("Example: crowl https://example.com");
}

/// Sets up the logging/tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise the crate logs at info.
fn setup_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crowl=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the crawl operation
async fn run(seed: &str) -> anyhow::Result<()> {
    let config_path = config_path_from_env();
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    println!("Crawling: {}", seed);
    let outcome = crawl(seed, config).await?;

    println!();
    print_statistics(&outcome.statistics);

    println!("=== Crawl Complete ===");
    println!("Results saved to CSV file: {}", outcome.report_destination);

    Ok(())
}
