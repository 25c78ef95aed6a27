//! URL handling module for Crowl
//!
//! This module provides host extraction for seed URLs and the same-domain
//! link filter that turns a page's raw anchors into the crawl work list.

mod domain;
mod extract;

// Re-export main functions
pub use domain::{extract_domain, parse_seed};
pub use extract::extract_same_domain_links;
