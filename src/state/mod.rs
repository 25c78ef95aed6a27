//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageKind`: Classification given to every row of the report (main page, sub page, error page)
//! - `CrawlPhase`: The phase a crawl run is in, from seed fetch through report writing

mod crawl_phase;
mod page_kind;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use page_kind::PageKind;
