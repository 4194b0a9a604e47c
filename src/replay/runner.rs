//! Replay execution
//!
//! Feeds a recorded traversal event log through a session, standing in for
//! the live page-traversal driver. The runner follows the driver protocol:
//! dedup-check each candidate link before navigating, record classifier
//! outcomes as they arrive, and advance the page counter only on a
//! confirmed navigation.

use crate::replay::{ReplayEvent, ReplayLog};
use crate::session::{DetectionResult, Session};
use crate::storage::{SessionStatus, SessionStore};
use crate::PagetrailError;

/// Counters describing what a replay did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Candidate links that were new and navigated to
    pub pages_visited: u64,

    /// Candidate links skipped because they were already visited
    pub duplicates_skipped: u64,

    /// Confirmed navigations that advanced the page counter
    pub pages_advanced: u64,

    /// Whether the log carried an end marker
    pub ended: bool,
}

/// Runs a replay log through a session
///
/// # Arguments
///
/// * `log` - The recorded event log
/// * `session` - A session to mutate; typically fresh
///
/// # Returns
///
/// Counters describing the replay
pub fn run_replay(log: &ReplayLog, session: &mut Session) -> ReplayOutcome {
    let mut outcome = ReplayOutcome::default();

    // A visit only counts as a page once the log confirms the navigation
    let mut pending_navigation = false;

    for event in &log.events {
        match event {
            ReplayEvent::Start { url } => {
                session.start();
                if let Some(url) = url {
                    session.set_location(url);
                    session.mark_current();
                }
            }

            ReplayEvent::Visit { url } => {
                if session.check_and_record(url) {
                    outcome.duplicates_skipped += 1;
                    tracing::debug!("Skipping revisit of {}", url);
                } else {
                    session.set_location(url);
                    pending_navigation = true;
                    outcome.pages_visited += 1;
                }
            }

            ReplayEvent::Detection {
                kind,
                confidence,
                page,
            } => {
                session.set_detection_result(DetectionResult {
                    kind: *kind,
                    confidence: *confidence,
                    page: *page,
                });
            }

            ReplayEvent::Advance => {
                if pending_navigation {
                    session.increment_page();
                    pending_navigation = false;
                    outcome.pages_advanced += 1;
                } else {
                    tracing::warn!("Advance event without a pending navigation, ignoring");
                }
            }

            ReplayEvent::End => {
                session.end();
                outcome.ended = true;
            }
        }
    }

    outcome
}

/// Runs a replay log through a session and persists the result
///
/// Creates a session row, replays the log, records every page transition
/// and visited URL, then finalizes the row. Logs without an end marker are
/// stored as interrupted.
///
/// # Returns
///
/// The persisted session ID and the replay counters
pub fn replay_and_store(
    log: &ReplayLog,
    session: &mut Session,
    store: &mut dyn SessionStore,
    label: &str,
    config_hash: &str,
) -> Result<(i64, ReplayOutcome), PagetrailError> {
    let session_id = store.create_session(label, config_hash)?;
    tracing::info!("Replaying {} events as session {}", log.events.len(), session_id);

    let outcome = run_replay(log, session);

    for transition in session.pagination().history() {
        store.record_transition(session_id, transition)?;
    }
    for url in session.visited().urls() {
        store.record_visited_url(session_id, url)?;
    }

    let status = if outcome.ended {
        SessionStatus::Completed
    } else {
        SessionStatus::Interrupted
    };
    store.finish_session(session_id, session, status)?;

    Ok((session_id, outcome))
}
