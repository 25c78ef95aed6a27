//! Crawl run phases
//!
//! A run moves strictly forward through
//! `Init -> FetchSeed -> ExtractLinks -> CrawlLinks -> Finalize -> Done`.
//! `Aborted` is reachable only while the seed is being fetched, or from any
//! non-terminal phase when the user interrupts the run.

use std::fmt;

/// The phase a crawl run is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    Init,
    FetchSeed,
    ExtractLinks,
    CrawlLinks,
    Finalize,
    Done,
    Aborted,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the run may move from `self` to `next`
    ///
    /// Interrupts are handled separately by [`CrawlPhase::can_interrupt`].
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Init, Self::FetchSeed)
                | (Self::Init, Self::Aborted)
                | (Self::FetchSeed, Self::ExtractLinks)
                | (Self::FetchSeed, Self::Aborted)
                | (Self::ExtractLinks, Self::CrawlLinks)
                | (Self::CrawlLinks, Self::Finalize)
                | (Self::Finalize, Self::Done)
        )
    }

    /// Returns true if a user interrupt may abort the run from this phase
    pub fn can_interrupt(&self) -> bool {
        !self.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::FetchSeed => "fetch_seed",
            Self::ExtractLinks => "extract_links",
            Self::CrawlLinks => "crawl_links",
            Self::Finalize => "finalize",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            CrawlPhase::Init,
            CrawlPhase::FetchSeed,
            CrawlPhase::ExtractLinks,
            CrawlPhase::CrawlLinks,
            CrawlPhase::Finalize,
            CrawlPhase::Done,
        ];
        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_abort_only_before_links_are_crawled() {
        assert!(CrawlPhase::Init.can_transition_to(CrawlPhase::Aborted));
        assert!(CrawlPhase::FetchSeed.can_transition_to(CrawlPhase::Aborted));
        assert!(!CrawlPhase::ExtractLinks.can_transition_to(CrawlPhase::Aborted));
        assert!(!CrawlPhase::CrawlLinks.can_transition_to(CrawlPhase::Aborted));
        assert!(!CrawlPhase::Finalize.can_transition_to(CrawlPhase::Aborted));
    }

    #[test]
    fn test_no_skipping_or_going_back() {
        assert!(!CrawlPhase::FetchSeed.can_transition_to(CrawlPhase::CrawlLinks));
        assert!(!CrawlPhase::CrawlLinks.can_transition_to(CrawlPhase::ExtractLinks));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Init));
    }

    #[test]
    fn test_interrupt() {
        assert!(CrawlPhase::CrawlLinks.can_interrupt());
        assert!(!CrawlPhase::Done.can_interrupt());
        assert!(!CrawlPhase::Aborted.can_interrupt());
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlPhase::FetchSeed.to_string(), "fetch_seed");
        assert_eq!(CrawlPhase::Aborted.to_string(), "aborted");
    }
}
