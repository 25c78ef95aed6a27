//! Same-domain link filtering
//!
//! Turns the raw anchor hrefs of a loaded page into the list of pages to visit.

use crate::url::domain::extract_domain;
use std::collections::HashSet;
use url::Url;

/// Filters raw anchor hrefs down to distinct same-domain links
///
/// # Filtering Rules
///
/// **Include** an href only when:
/// - it parses as an absolute URL
/// - its host equals `target_host` (compared lowercase on both sides)
/// - it is not the same string as `current_page_url`
///
/// **Exclude** silently:
/// - hrefs that fail to parse (empty strings, bare relative paths)
/// - hosts that differ from the target, including subdomains
/// - hostless URLs such as `javascript:void(0)` or `mailto:`
///
/// Duplicates are removed by exact string equality and the first occurrence
/// wins, so the output keeps discovery order.
///
/// # Arguments
///
/// * `hrefs` - Fully resolved anchor hrefs from the page
/// * `target_host` - The host the crawl is scoped to
/// * `current_page_url` - URL of the page the anchors were read from
///
/// # Example
///
/// ```
/// use crowl::url::extract_same_domain_links;
///
/// let hrefs = vec![
///     "https://example.com/a".to_string(),
///     "https://example.com/a".to_string(),
///     "https://other.com/x".to_string(),
/// ];
/// let links = extract_same_domain_links(&hrefs, "example.com", "https://example.com/");
/// assert_eq!(links, vec!["https://example.com/a".to_string()]);
/// ```
pub fn extract_same_domain_links(
    hrefs: &[String],
    target_host: &str,
    current_page_url: &str,
) -> Vec<String> {
    let target_host = target_host.to_lowercase();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let parsed = match Url::parse(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::trace!("Dropping malformed href {:?}: {}", href, e);
                continue;
            }
        };

        if extract_domain(&parsed).as_deref() != Some(target_host.as_str()) {
            continue;
        }

        if href == current_page_url {
            continue;
        }

        if seen.insert(href.as_str()) {
            links.push(href.clone());
        }
    }

    links
}
