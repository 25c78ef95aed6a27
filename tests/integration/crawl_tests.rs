//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seed fetch to the CSV on disk.

use crowl::config::Config;
use crowl::crawler::{Coordinator, HttpBrowser};
use crowl::output::CsvReportWriter;
use crowl::state::PageKind;
use crowl::CrawlError;
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts and throttle
fn create_test_config(report_path: &Path) -> Config {
    let mut config = Config::default();
    config.crawler.link_timeout_ms = 300;
    config.crawler.navigation_timeout_ms = 2_000;
    config.crawler.throttle_delay_ms = 20;
    config.output.report_path = report_path.display().to_string();
    config
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn run_crawl(seed: &str, config: &Config) -> Result<crowl::CrawlOutcome, CrawlError> {
    let browser = HttpBrowser::new(config).expect("Failed to build browser");
    let writer = CsvReportWriter::new(&config.output.report_path);
    let mut coordinator = Coordinator::new(browser, writer, config.crawler.clone());
    coordinator.run(seed).await
}

/// Port with nothing listening on it
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local addr").port()
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"<a href="/">Home</a>
                <a href="{base}/page1">Page 1</a>
                <a href="/page2">Page 2</a>
                <a href="{base}/page1">Page 1 again</a>
                <a href="https://other.example.org/x">Elsewhere</a>
                <a href="mailto:team@example.com">Mail</a>
                <a href="javascript:void(0)">Nothing</a>"#,
                base = base_url
            ),
        ),
    )
    .await;
    mount_page(&mock_server, "/page1", html_page("Page 1", "Content 1")).await;
    mount_page(&mock_server, "/page2", html_page("Page \"Two\"", "Content 2")).await;

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let config = create_test_config(&report);
    let seed = format!("{}/", base_url);

    let outcome = run_crawl(&seed, &config).await.expect("Crawl failed");

    let kinds: Vec<PageKind> = outcome.records.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![PageKind::MainPage, PageKind::SubPage, PageKind::SubPage]
    );

    let content = std::fs::read_to_string(&report).expect("Report not written");
    let expected = format!(
        "\"URL\",\"Title\",\"PageType\"\n\
         \"{base}/\",\"Home\",\"MainPage\"\n\
         \"{base}/page1\",\"Page 1\",\"SubPage\"\n\
         \"{base}/page2\",\"Page \"\"Two\"\"\",\"SubPage\"\n",
        base = base_url
    );
    assert_eq!(content, expected);
}

#[tokio::test]
async fn test_failing_links_are_recorded_and_crawl_continues() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="/ok">Ok</a>
            <a href="/broken">Broken</a>
            <a href="/slow">Slow</a>
            <a href="/last">Last</a>"#,
        ),
    )
    .await;
    mount_page(&mock_server, "/ok", html_page("Ok", "")).await;
    mount_page(&mock_server, "/broken", ResponseTemplate::new(500)).await;
    mount_page(
        &mock_server,
        "/slow",
        html_page("Slow", "").set_delay(Duration::from_secs(2)),
    )
    .await;
    mount_page(&mock_server, "/last", html_page("Last", "")).await;

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let config = create_test_config(&report);

    let outcome = run_crawl(&format!("{}/", base_url), &config)
        .await
        .expect("Crawl failed");
    let records = outcome.records;

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].kind, PageKind::MainPage);
    assert_eq!(records[1].kind, PageKind::SubPage);
    assert_eq!(records[2].kind, PageKind::ErrorPage);
    assert_eq!(
        records[2].title,
        format!("Error: HTTP 500 for {}/broken", base_url)
    );
    assert_eq!(records[3].kind, PageKind::ErrorPage);
    assert_eq!(records[3].title, "Error: Navigation timeout of 300 ms exceeded");
    assert_eq!(records[4].kind, PageKind::SubPage);
    assert_eq!(records[4].title, "Last");

    let mut reader = csv::Reader::from_path(&report).expect("Report not written");
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[3][2], "ErrorPage");
}

#[tokio::test]
async fn test_seed_failure_writes_no_report() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", ResponseTemplate::new(503)).await;

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let config = create_test_config(&report);

    let err = run_crawl(&format!("{}/", mock_server.uri()), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, CrawlError::SeedFetch { .. }));
    assert!(!report.exists());
}

#[tokio::test]
async fn test_unreachable_seed_writes_no_report() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let config = create_test_config(&report);

    let err = run_crawl(&format!("http://127.0.0.1:{}/", closed_port()), &config)
        .await
        .unwrap_err();

    assert!(matches!(err, CrawlError::SeedFetch { .. }));
    assert!(!report.exists());
}

#[tokio::test]
async fn test_existing_report_is_overwritten() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", html_page("Only", "")).await;

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    std::fs::write(&report, "old,report\n".repeat(100)).unwrap();
    let config = create_test_config(&report);

    run_crawl(&format!("{}/", mock_server.uri()), &config)
        .await
        .expect("Crawl failed");

    let content = std::fs::read_to_string(&report).unwrap();
    assert!(!content.contains("old,report"));
    assert_eq!(content.lines().count(), 2);
}

#[tokio::test]
async fn test_links_are_visited_in_discovery_order_with_throttle() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="/c">C</a><a href="/a">A</a><a href="/b">B</a>"#,
        ),
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_page(&mock_server, route, html_page(route, "")).await;
    }

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let mut config = create_test_config(&report);
    config.crawler.throttle_delay_ms = 100;

    let started = std::time::Instant::now();
    let outcome = run_crawl(&format!("{}/", mock_server.uri()), &config)
        .await
        .expect("Crawl failed");
    let elapsed = started.elapsed();

    let titles: Vec<&str> = outcome.records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Home", "/c", "/a", "/b"]);

    // Two pauses between three links
    assert!(elapsed >= Duration::from_millis(200), "elapsed {:?}", elapsed);

    let requests = mock_server.received_requests().await.unwrap();
    let paths: Vec<&str> = requests.iter().map(|r| r.url.path()).collect();
    assert_eq!(paths, vec!["/", "/c", "/a", "/b"]);
}

#[tokio::test]
async fn test_meta_declared_encoding_reaches_report() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<a href="/jp">JP</a>"#),
    )
    .await;

    // "日本語" in Shift_JIS, declared only by the meta tag
    let mut body = b"<html><head><meta charset=\"Shift_JIS\"><title>".to_vec();
    body.extend_from_slice(&[0x93, 0xfa, 0x96, 0x7b, 0x8c, 0xea]);
    body.extend_from_slice(b"</title></head><body></body></html>");
    mount_page(
        &mock_server,
        "/jp",
        ResponseTemplate::new(200).set_body_raw(body, "text/html"),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let report = dir.path().join("crawl_results.csv");
    let config = create_test_config(&report);

    let outcome = run_crawl(&format!("{}/", mock_server.uri()), &config)
        .await
        .expect("Crawl failed");

    assert_eq!(outcome.records[1].title, "日本語");
    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("\"日本語\",\"SubPage\""));
}

#[test]
fn test_cli_without_url_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_crowl"))
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: crowl <URL>"));
    assert!(stdout.contains("Example: crowl https://example.com"));
}

#[test]
fn test_cli_seed_failure_exits_nonzero_without_report() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_crowl"))
        .arg(format!("http://127.0.0.1:{}/", closed_port()))
        .current_dir(dir.path())
        .env_remove("CROWL_CONFIG")
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(!dir.path().join("crawl_results.csv").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load seed page"), "stderr: {}", stderr);
}
