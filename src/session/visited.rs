use crate::url::{try_normalize_url, NormalizeOptions};
use std::collections::HashSet;

/// Set of canonicalized URLs already visited during a traversal session
///
/// Membership testing doubles as insertion: [`VisitedSet::check_and_record`]
/// is a test-and-set, so a single call mutates state. URLs that cannot be
/// parsed fall open and are recorded verbatim; each such failure is counted
/// and visible through [`VisitedSet::parse_failures`].
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    seen: HashSet<String>,
    options: NormalizeOptions,
    parse_failures: u64,
}

impl VisitedSet {
    /// Creates an empty set with default canonicalization options
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with the given canonicalization options
    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Checks whether a URL was already visited, recording it if not
    ///
    /// Returns true if the canonical form of `url` is already in the set (no
    /// insert happens). Returns false after inserting it. This is a
    /// test-and-set, not a pure query.
    pub fn check_and_record(&mut self, url: &str) -> bool {
        let canonical = self.canonicalize(url);
        let newly_inserted = self.seen.insert(canonical);
        if newly_inserted {
            tracing::debug!("Recorded new URL: {}", url);
        } else {
            tracing::debug!("URL already visited: {}", url);
        }
        !newly_inserted
    }

    /// Records a URL unconditionally
    pub fn record(&mut self, url: &str) {
        let canonical = self.canonicalize(url);
        self.seen.insert(canonical);
    }

    /// Checks whether a URL was already visited, without recording it
    pub fn contains(&self, url: &str) -> bool {
        let canonical = crate::url::normalize_or_original(url, &self.options);
        self.seen.contains(&canonical)
    }

    /// Returns the recorded canonical URLs
    pub fn urls(&self) -> &HashSet<String> {
        &self.seen
    }

    /// Returns the number of recorded URLs
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if no URLs have been recorded
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Returns how many recorded URLs could not be canonicalized
    pub fn parse_failures(&self) -> u64 {
        self.parse_failures
    }

    /// Clears all recorded URLs and the parse-failure count
    pub fn reset(&mut self) {
        self.seen.clear();
        self.parse_failures = 0;
    }

    /// Canonicalizes a URL, counting fail-open fallbacks
    fn canonicalize(&mut self, url: &str) -> String {
        match try_normalize_url(url, &self.options) {
            Ok(canonical) => canonical,
            Err(e) => {
                self.parse_failures += 1;
                tracing::debug!("Recording URL verbatim, canonicalization failed: {}", e);
                url.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visit_false_then_true() {
        let mut set = VisitedSet::new();
        assert!(!set.check_and_record("https://example.com/page"));
        assert!(set.check_and_record("https://example.com/page"));
        assert!(set.check_and_record("https://example.com/page"));
    }

    #[test]
    fn test_query_reordered_url_is_same_destination() {
        let mut set = VisitedSet::new();
        assert!(!set.check_and_record("https://x.com/a/?b=2&a=1"));
        assert!(set.check_and_record("https://x.com/a?a=1&b=2"));
    }

    #[test]
    fn test_trailing_slash_is_same_destination() {
        let mut set = VisitedSet::new();
        assert!(!set.check_and_record("https://example.com/list/"));
        assert!(set.check_and_record("https://example.com/list"));
    }

    #[test]
    fn test_distinct_urls_both_recorded() {
        let mut set = VisitedSet::new();
        assert!(!set.check_and_record("https://example.com/list?page=1"));
        assert!(!set.check_and_record("https://example.com/list?page=2"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_record_unconditionally() {
        let mut set = VisitedSet::new();
        set.record("https://example.com/start");
        set.record("https://example.com/start");
        assert_eq!(set.len(), 1);
        assert!(set.check_and_record("https://example.com/start"));
    }

    #[test]
    fn test_contains_does_not_record() {
        let mut set = VisitedSet::new();
        assert!(!set.contains("https://example.com/page"));
        assert!(set.is_empty());

        set.record("https://example.com/page/");
        assert!(set.contains("https://example.com/page"));
    }

    #[test]
    fn test_urls_are_canonical() {
        let mut set = VisitedSet::new();
        set.record("https://example.com/a/?b=2&a=1");
        assert!(set.urls().contains("https://example.com/a?a=1&b=2"));
    }

    #[test]
    fn test_malformed_url_recorded_verbatim() {
        let mut set = VisitedSet::new();
        assert!(!set.check_and_record("not a url"));
        assert!(set.check_and_record("not a url"));
        assert_eq!(set.parse_failures(), 2);
        assert!(set.urls().contains("not a url"));
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut set = VisitedSet::new();
        set.check_and_record("https://example.com/page");
        set.check_and_record("garbage");
        set.reset();

        assert!(set.is_empty());
        assert_eq!(set.parse_failures(), 0);
        assert!(!set.check_and_record("https://example.com/page"));
    }

    #[test]
    fn test_options_apply_to_dedup() {
        let options = NormalizeOptions {
            strip_tracking_params: true,
            ..Default::default()
        };
        let mut set = VisitedSet::with_options(options);
        assert!(!set.check_and_record("https://example.com/page?utm_source=a"));
        assert!(set.check_and_record("https://example.com/page?utm_source=b"));
    }
}
