use crate::CrawlError;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (`mailto:`, `javascript:`, `data:` and the like), it returns None.
///
/// # Arguments
///
/// * `url` - The URL to extract the domain from
///
/// # Returns
///
/// * `Some(String)` - The lowercase domain/host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crowl::url::extract_domain;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("javascript:void(0)").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Parses the user-supplied seed URL and derives the target host
///
/// A seed that is not an absolute URL, or has no host to scope the crawl to,
/// is fatal to the run.
///
/// # Returns
///
/// * `Ok((Url, String))` - The parsed seed and its lowercase host
/// * `Err(CrawlError::InvalidSeed)` - The seed cannot be crawled
pub fn parse_seed(seed: &str) -> Result<(Url, String), CrawlError> {
    let url = Url::parse(seed).map_err(|e| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason: e.to_string(),
    })?;

    let host = extract_domain(&url).ok_or_else(|| CrawlError::InvalidSeed {
        url: seed.to_string(),
        reason: "URL has no host".to_string(),
    })?;

    Ok((url, host))
}
