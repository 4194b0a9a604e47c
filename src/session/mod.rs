//! Session state for a single traversal run
//!
//! This module provides the per-session trackers a page-traversal driver
//! leans on while walking a paginated listing:
//!
//! - `VisitedSet`: test-and-set deduplication over canonicalized URLs
//! - `PaginationTracker`: current page, detection metadata, transition history
//! - `Session`: both trackers bundled with the driver's current location
//!
//! Each instance is exclusively owned by the session that created it;
//! construct at session start, reset or discard at session end.

mod pagination;
mod visited;

// Re-export main types
pub use pagination::{
    DetectionBrief, DetectionKind, DetectionResult, PageTransition, PaginationSummary,
    PaginationTracker,
};
pub use visited::VisitedSet;

use crate::url::NormalizeOptions;

/// Both per-session trackers plus the driver's current location
///
/// The original consumers of these trackers read the live page address out
/// of their environment; here the driver reports it explicitly through
/// [`Session::set_location`], and `mark_current`/`increment_page` read it
/// back. Calls that need a location while none is set are permissive no-ops,
/// consistent with the trackers' own anything-goes state machine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    visited: VisitedSet,
    pagination: PaginationTracker,
    location: Option<String>,
}

impl Session {
    /// Creates a fresh session with default canonicalization options
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session with the given canonicalization options
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            visited: VisitedSet::with_options(options),
            pagination: PaginationTracker::new(),
            location: None,
        }
    }

    /// Records the session start timestamp
    pub fn start(&mut self) {
        self.pagination.start();
        tracing::info!("Session started");
    }

    /// Records the session end timestamp
    pub fn end(&mut self) {
        self.pagination.end();
        tracing::info!(
            "Session ended after {} ms on page {}",
            self.pagination.duration_ms(),
            self.pagination.current_page()
        );
    }

    /// Sets the driver's current location
    pub fn set_location(&mut self, url: &str) {
        self.location = Some(url.to_string());
    }

    /// Returns the driver's current location, if reported
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Checks whether a candidate URL was already visited, recording it if not
    ///
    /// Test-and-set: a single call mutates state. Drivers call this before
    /// following a candidate next-page link and skip navigation on true.
    pub fn check_and_record(&mut self, url: &str) -> bool {
        self.visited.check_and_record(url)
    }

    /// Records the current location in the visited set
    ///
    /// Does nothing if no location has been reported yet.
    pub fn mark_current(&mut self) {
        match &self.location {
            Some(url) => self.visited.record(url),
            None => tracing::debug!("mark_current called with no location set"),
        }
    }

    /// Stores the latest page-detection outcome
    pub fn set_detection_result(&mut self, detection: DetectionResult) {
        self.pagination.set_detection_result(detection);
    }

    /// Advances the page counter, stamping the current location into history
    ///
    /// With no location reported, the history entry carries an empty URL.
    /// Returns the new page number.
    pub fn increment_page(&mut self) -> u32 {
        if self.location.is_none() {
            tracing::debug!("increment_page called with no location set");
        }
        let url = self.location.as_deref().unwrap_or("");
        self.pagination.increment_page(url)
    }

    /// Elapsed milliseconds since `start`; see [`PaginationTracker::duration_ms`]
    pub fn duration_ms(&self) -> i64 {
        self.pagination.duration_ms()
    }

    /// Returns a condensed view of the session
    pub fn summary(&self) -> PaginationSummary {
        self.pagination.summary()
    }

    /// Restores both trackers to their initial state and clears the location
    pub fn reset(&mut self) {
        self.visited.reset();
        self.pagination.reset();
        self.location = None;
    }

    /// Returns the visited-URL tracker
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    /// Returns the visited-URL tracker mutably
    pub fn visited_mut(&mut self) -> &mut VisitedSet {
        &mut self.visited
    }

    /// Returns the pagination tracker
    pub fn pagination(&self) -> &PaginationTracker {
        &self.pagination
    }

    /// Returns the pagination tracker mutably
    pub fn pagination_mut(&mut self) -> &mut PaginationTracker {
        &mut self.pagination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_current_records_location() {
        let mut session = Session::new();
        session.set_location("https://example.com/list/");
        session.mark_current();

        assert_eq!(session.visited().len(), 1);
        assert!(session.check_and_record("https://example.com/list"));
    }

    #[test]
    fn test_mark_current_without_location_is_noop() {
        let mut session = Session::new();
        session.mark_current();
        assert!(session.visited().is_empty());
    }

    #[test]
    fn test_increment_page_stamps_location() {
        let mut session = Session::new();
        session.set_location("https://example.com/list?page=2");
        let page = session.increment_page();

        assert_eq!(page, 2);
        let history = session.pagination().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].url, "https://example.com/list?page=2");
    }

    #[test]
    fn test_increment_page_without_location() {
        let mut session = Session::new();
        let page = session.increment_page();

        assert_eq!(page, 2);
        assert_eq!(session.pagination().history()[0].url, "");
    }

    #[test]
    fn test_driver_protocol_skips_revisits() {
        let mut session = Session::new();
        session.start();
        session.set_location("https://example.com/list");
        session.mark_current();

        // First candidate is new: navigate and advance
        assert!(!session.check_and_record("https://example.com/list?page=2"));
        session.set_location("https://example.com/list?page=2");
        session.increment_page();

        // Same candidate with reordered noise is recognized
        assert!(session.check_and_record("https://example.com/list/?page=2"));

        session.end();
        let summary = session.summary();
        assert_eq!(summary.current_page, 2);
        assert_eq!(summary.transitions, 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = Session::new();
        session.start();
        session.set_location("https://example.com/a");
        session.mark_current();
        session.increment_page();
        session.set_detection_result(DetectionResult {
            kind: DetectionKind::NextButton,
            confidence: 0.9,
            page: Some(3),
        });

        session.reset();

        assert!(session.visited().is_empty());
        assert_eq!(session.pagination().current_page(), 1);
        assert!(session.pagination().history().is_empty());
        assert!(session.location().is_none());
        assert_eq!(session.duration_ms(), 0);
    }

    #[test]
    fn test_with_options_applies_to_dedup() {
        let options = NormalizeOptions {
            strip_www: true,
            ..Default::default()
        };
        let mut session = Session::with_options(options);
        assert!(!session.check_and_record("https://www.example.com/a"));
        assert!(session.check_and_record("https://example.com/a"));
    }
}
