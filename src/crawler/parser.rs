//! HTML parser for extracting the page title and anchor hrefs
//!
//! The output mirrors what a browser DOM reports: `document.title` and the
//! resolved `href` property of every `<a href>` element.

use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title, whitespace-collapsed; empty when the page has none
    pub title: String,

    /// Every anchor href, resolved against the document base URL
    pub hrefs: Vec<String>,
}

/// Parses HTML content and extracts the title and anchor hrefs
///
/// # Href Resolution
///
/// - Relative hrefs resolve against `<base href>` when present and valid,
///   otherwise against `page_url`
/// - Hrefs that cannot be resolved are kept verbatim, the same way a DOM
///   returns the raw attribute for an unparsable URL
/// - Nothing is filtered here; scoping happens in the link extractor
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The final URL the document was loaded from
///
/// # Example
///
/// ```
/// use crowl::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &page_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.hrefs, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, page_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let base_url = document_base_url(&document, page_url);
    let hrefs = extract_hrefs(&document, &base_url);

    ParsedPage { title, hrefs }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    let Ok(title_selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&title_selector)
        .next()
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Determines the URL relative hrefs resolve against
fn document_base_url(document: &Html, page_url: &Url) -> Url {
    let Ok(base_selector) = Selector::parse("base[href]") else {
        return page_url.clone();
    };

    document
        .select(&base_selector)
        .next()
        .and_then(|element| element.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Extracts all anchor hrefs from the HTML document
fn extract_hrefs(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| resolve_href(href, base_url))
        .collect()
}

/// Resolves an href the way the DOM `href` property does
fn resolve_href(href: &str, base_url: &Url) -> String {
    let href = href.trim();
    match base_url.join(href) {
        Ok(absolute_url) => absolute_url.to_string(),
        Err(_) => href.to_string(),
    }
}
