//! Pagination bookkeeping for a single traversal session
//!
//! Tracks the current page number, the latest page-type detection outcome,
//! session boundary timestamps, and a timestamped history of page
//! transitions. All operations are synchronous and in-memory; nothing here
//! enforces an ordering between them, so a driver may call any of them in
//! any session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strategy a page-type classifier used to recognize pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionKind {
    /// An explicit "next" link or button
    NextButton,

    /// Numbered page links (1, 2, 3, ...)
    NumberedLinks,

    /// A "load more" button appending to the current page
    LoadMore,

    /// Content loaded on scroll with no visible controls
    InfiniteScroll,

    /// A page counter embedded in the URL itself
    UrlPattern,

    /// Classifier could not tell
    Unknown,
}

impl DetectionKind {
    /// Converts the detection kind to a database string representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::NextButton => "next_button",
            Self::NumberedLinks => "numbered_links",
            Self::LoadMore => "load_more",
            Self::InfiniteScroll => "infinite_scroll",
            Self::UrlPattern => "url_pattern",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a detection kind from a database string representation
    ///
    /// Returns None if the string doesn't match any known kind.
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "next_button" => Some(Self::NextButton),
            "numbered_links" => Some(Self::NumberedLinks),
            "load_more" => Some(Self::LoadMore),
            "infinite_scroll" => Some(Self::InfiniteScroll),
            "url_pattern" => Some(Self::UrlPattern),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Returns all possible detection kinds
    pub fn all_kinds() -> Vec<Self> {
        vec![
            Self::NextButton,
            Self::NumberedLinks,
            Self::LoadMore,
            Self::InfiniteScroll,
            Self::UrlPattern,
            Self::Unknown,
        ]
    }
}

impl fmt::Display for DetectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// Outcome of an external page-type classification
///
/// The classifier runs outside this crate; the tracker only stores its
/// result. A detection carrying a page number is authoritative: it
/// overwrites the tracked current page immediately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Strategy the classifier recognized
    pub kind: DetectionKind,

    /// Classifier confidence in [0, 1]
    pub confidence: f64,

    /// Page number the classifier read off the page, if any
    #[serde(default)]
    pub page: Option<u32>,
}

/// A single page advance, captured when navigation is confirmed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageTransition {
    /// Page number after the advance
    pub page: u32,

    /// Location the driver reported at capture time
    pub url: String,

    /// Capture timestamp
    pub timestamp: DateTime<Utc>,
}

/// Reduced view of the last detection, for summaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionBrief {
    pub kind: DetectionKind,
    pub confidence: f64,
}

/// Condensed session report: current position, activity, and timing
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationSummary {
    /// Current page number
    pub current_page: u32,

    /// Number of recorded page transitions
    pub transitions: usize,

    /// Elapsed session time in milliseconds
    pub duration_ms: i64,

    /// Kind and confidence of the most recent detection, if any
    pub last_detection: Option<DetectionBrief>,
}

/// Tracks pagination state over one scraping session
///
/// Created per session, mutated as pages are visited, and reset or discarded
/// at session end. The page counter starts at 1 and only moves forward
/// through [`PaginationTracker::increment_page`]; a detection result carrying
/// a page number may rewrite it in either direction.
#[derive(Debug, Clone)]
pub struct PaginationTracker {
    current_page: u32,
    last_detection: Option<DetectionResult>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    history: Vec<PageTransition>,
}

impl PaginationTracker {
    /// Creates a fresh tracker positioned on page 1
    pub fn new() -> Self {
        Self {
            current_page: 1,
            last_detection: None,
            started_at: None,
            ended_at: None,
            history: Vec::new(),
        }
    }

    /// Returns the current page number
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the most recent detection result, if any
    pub fn last_detection(&self) -> Option<DetectionResult> {
        self.last_detection
    }

    /// Returns the recorded page transitions, oldest first
    pub fn history(&self) -> &[PageTransition] {
        &self.history
    }

    /// Returns the session start timestamp, if started
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the session end timestamp, if ended
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Returns true once `start` has been called
    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns true once `end` has been called
    pub fn has_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Stores the latest page-detection outcome
    ///
    /// If the detection carries a page number it overwrites the tracked
    /// current page immediately.
    pub fn set_detection_result(&mut self, detection: DetectionResult) {
        if let Some(page) = detection.page {
            self.current_page = page.max(1);
            tracing::debug!(
                "Detection ({}, confidence {:.2}) set current page to {}",
                detection.kind,
                detection.confidence,
                self.current_page
            );
        }
        self.last_detection = Some(detection);
    }

    /// Advances the page counter and records the transition
    ///
    /// Appends a history entry capturing the new page number, the location
    /// the driver reported, and a capture timestamp. Returns the new page
    /// number.
    pub fn increment_page(&mut self, url: &str) -> u32 {
        self.current_page = self.current_page.saturating_add(1);
        self.history.push(PageTransition {
            page: self.current_page,
            url: url.to_string(),
            timestamp: Utc::now(),
        });
        tracing::debug!("Advanced to page {} at {}", self.current_page, url);
        self.current_page
    }

    /// Records the session start timestamp
    pub fn start(&mut self) {
        self.started_at = Some(Utc::now());
    }

    /// Records the session end timestamp
    pub fn end(&mut self) {
        self.ended_at = Some(Utc::now());
    }

    /// Elapsed milliseconds from start to end, or to now if still running
    ///
    /// Returns 0 if the session was never started. Clamped at zero against
    /// wall-clock steps.
    pub fn duration_ms(&self) -> i64 {
        let Some(started) = self.started_at else {
            return 0;
        };
        let end = self.ended_at.unwrap_or_else(Utc::now);
        (end - started).num_milliseconds().max(0)
    }

    /// Restores the tracker to its exact initial state
    ///
    /// Page 1, empty history, no detection, no timestamps.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns a condensed view of the session
    pub fn summary(&self) -> PaginationSummary {
        PaginationSummary {
            current_page: self.current_page,
            transitions: self.history.len(),
            duration_ms: self.duration_ms(),
            last_detection: self.last_detection.map(|d| DetectionBrief {
                kind: d.kind,
                confidence: d.confidence,
            }),
        }
    }
}

impl Default for PaginationTracker {
    fn default() -> Self {
        Self::new()
    }
}
