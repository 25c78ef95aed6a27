/// Page classification for crawl records
///
/// Every row of the report carries exactly one of these kinds.
use std::fmt;

/// Classification of a crawled page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// The seed page the crawl started from (exactly one per run, always first)
    MainPage,

    /// A same-domain link that was fetched successfully
    SubPage,

    /// A same-domain link whose fetch failed
    ErrorPage,
}

impl PageKind {
    /// Returns true if this is the seed page
    pub fn is_main(&self) -> bool {
        matches!(self, Self::MainPage)
    }

    /// Returns true if this represents a failed fetch
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ErrorPage)
    }

    /// Label written to the report's PageType column
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainPage => "MainPage",
            Self::SubPage => "SubPage",
            Self::ErrorPage => "ErrorPage",
        }
    }

    /// Returns all page kinds
    pub fn all_kinds() -> Vec<Self> {
        vec![Self::MainPage, Self::SubPage, Self::ErrorPage]
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
