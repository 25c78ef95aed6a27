//! Page fetcher implementation
//!
//! This module defines the browser boundary the crawler talks to:
//! - `Browser` opens isolated page sessions and is closed once per run
//! - `Page` navigates to a URL, reports its title, and lists its anchors
//!
//! `HttpBrowser` implements both on top of reqwest and the HTML parser.
//! It does not execute JavaScript, so a page is settled as soon as its
//! body has been downloaded.

use crate::config::Config;
use crate::crawler::parser::{parse_html, ParsedPage};
use crate::{CrawlError, FetchError};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use reqwest::{redirect::Policy, Client};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use url::Url;

/// When a navigation counts as finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadinessPolicy {
    /// The document and its load event have completed
    #[default]
    Load,

    /// The network has been mostly quiet for a short while after load
    NetworkAlmostIdle,
}

/// Options for a single navigation
#[derive(Debug, Clone, Default)]
pub struct NavigationOptions {
    /// Overrides the browser's default navigation timeout
    pub timeout: Option<Duration>,

    /// Readiness condition to wait for
    pub wait_until: ReadinessPolicy,
}

impl NavigationOptions {
    pub fn new(timeout: Duration, wait_until: ReadinessPolicy) -> Self {
        Self {
            timeout: Some(timeout),
            wait_until,
        }
    }
}

/// An isolated page session
///
/// Pages must be closed after use on every path, success or failure.
#[async_trait]
pub trait Page: Send {
    /// Navigates to `url` and returns the document title
    ///
    /// Fails on network, DNS and HTTP errors, and when the navigation takes
    /// longer than the effective timeout.
    ///
    /// `options.wait_until` is a hint. A page that runs no scripts, such as
    /// `HttpPage`, is settled once its body is read, so `NetworkAlmostIdle`
    /// finishes at the same point as `Load`.
    async fn navigate(&mut self, url: &str, options: &NavigationOptions)
        -> Result<String, FetchError>;

    /// Resolved `href` of every anchor in the currently loaded document
    fn anchor_hrefs(&self) -> Vec<String>;

    /// URL of the currently loaded document, after redirects
    fn current_url(&self) -> Option<&str>;

    /// Releases the session. Calling it more than once is harmless.
    async fn close(&mut self);
}

/// A browser that hands out page sessions
#[async_trait]
pub trait Browser: Send + Sync {
    type Page: Page;

    /// Opens a new, isolated page
    async fn new_page(&self) -> Result<Self::Page, FetchError>;

    /// Shuts the browser down. Pages opened afterwards fail.
    async fn close(&self);
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Browser backed by a plain HTTP client
pub struct HttpBrowser {
    client: Client,
    default_timeout: Duration,
    closed: AtomicBool,
}

impl HttpBrowser {
    /// Creates a browser from the run configuration
    ///
    /// The seed page uses `navigation_timeout_ms` as its default timeout.
    pub fn new(config: &Config) -> Result<Self, CrawlError> {
        let client = build_http_client(config).map_err(|e| CrawlError::Browser(e.to_string()))?;
        Ok(Self::with_client(client, config.crawler.navigation_timeout()))
    }

    pub fn with_client(client: Client, default_timeout: Duration) -> Self {
        Self {
            client,
            default_timeout,
            closed: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    type Page = HttpPage;

    async fn new_page(&self) -> Result<HttpPage, FetchError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(FetchError::Session("browser has been closed".to_string()));
        }

        Ok(HttpPage {
            client: self.client.clone(),
            default_timeout: self.default_timeout,
            loaded: None,
            closed: false,
        })
    }

    async fn close(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("Browser closed");
        }
    }
}

/// A document loaded into an `HttpPage`
#[derive(Debug)]
struct LoadedDocument {
    url: String,
    parsed: ParsedPage,
}

/// Page session of an `HttpBrowser`
pub struct HttpPage {
    client: Client,
    default_timeout: Duration,
    loaded: Option<LoadedDocument>,
    closed: bool,
}

#[async_trait]
impl Page for HttpPage {
    async fn navigate(
        &mut self,
        url: &str,
        options: &NavigationOptions,
    ) -> Result<String, FetchError> {
        if self.closed {
            return Err(FetchError::Session("page has been closed".to_string()));
        }

        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let timeout_ms = timeout.as_millis() as u64;
        tracing::trace!(
            "Navigating to {} (timeout {}ms, wait until {:?})",
            url,
            timeout_ms,
            options.wait_until
        );

        let document = match tokio::time::timeout(timeout, load_document(&self.client, url, timeout))
            .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout_ms,
                })
            }
        };

        let title = document.parsed.title.clone();
        self.loaded = Some(document);
        Ok(title)
    }

    fn anchor_hrefs(&self) -> Vec<String> {
        self.loaded
            .as_ref()
            .map(|doc| doc.parsed.hrefs.clone())
            .unwrap_or_default()
    }

    fn current_url(&self) -> Option<&str> {
        self.loaded.as_ref().map(|doc| doc.url.as_str())
    }

    async fn close(&mut self) {
        self.loaded = None;
        self.closed = true;
    }
}

/// Fetches and parses a document
async fn load_document(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<LoadedDocument, FetchError> {
    let target = Url::parse(url).map_err(|e| FetchError::Navigation {
        url: url.to_string(),
        message: format!("Cannot navigate to invalid URL {}: {}", url, e),
    })?;

    let response = client
        .get(target)
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_error(url, timeout, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let is_html = content_type
        .as_deref()
        .map(|ct| ct.contains("html"))
        .unwrap_or(true);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| classify_error(url, timeout, e))?;
    let body = decode_body(&bytes, content_type.as_deref());

    let parsed = if is_html {
        parse_html(&body, &final_url)
    } else {
        tracing::debug!("{} is not HTML, skipping parse", final_url);
        ParsedPage::default()
    };

    Ok(LoadedDocument {
        url: final_url.to_string(),
        parsed,
    })
}

/// Bytes scanned for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

/// Decodes a response body to text
///
/// A byte order mark wins, then the `Content-Type` charset, then a
/// `<meta charset>` or `http-equiv` declaration near the top of the
/// document. Anything else is read as UTF-8.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes))
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!("Body contained malformed {} sequences", used.name());
    }
    text.into_owned()
}

/// Finds the encoding declared by a `<meta>` tag in the document head
fn sniff_meta_charset(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    let encoding = head
        .match_indices("<meta")
        .filter_map(|(start, _)| {
            let tag = &head[start..];
            let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
            charset_label(tag)
        })
        .find_map(|label| Encoding::for_label(label.as_bytes()))?;

    // A document that could be sniffed as ASCII is not UTF-16
    if encoding == UTF_16LE || encoding == UTF_16BE {
        return Some(UTF_8);
    }
    Some(encoding)
}

/// Extracts the value following `charset=` in a header or tag
fn charset_label(text: &str) -> Option<String> {
    let lower = text.to_ascii_lowercase();
    let start = lower.find("charset")? + "charset".len();
    let rest = lower[start..].trim_start().strip_prefix('=')?;
    let rest = rest.trim_start().trim_start_matches(|c| c == '"' || c == '\'');

    let label: String = rest
        .chars()
        .take_while(|c| !matches!(c, '"' | '\'' | ';' | '>' | '/') && !c.is_whitespace())
        .collect();

    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// Maps a reqwest error to a fetch error
fn classify_error(url: &str, timeout: Duration, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        };
    }

    FetchError::Navigation {
        url: url.to_string(),
        message: error_chain(&error),
    }
}

/// Joins an error and its sources into one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
