//! Markdown session report generation
//!
//! This module generates human-readable markdown reports for a single
//! persisted session: run metadata, the page-transition history, and the
//! visited-URL set.

use crate::output::OutputResult;
use crate::storage::{SessionRecord, SessionStore, TransitionRecord};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A session and everything recorded alongside it
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session: SessionRecord,
    pub transitions: Vec<TransitionRecord>,
    pub visited_urls: Vec<String>,
}

/// Loads the report data for a specific session
///
/// # Arguments
///
/// * `store` - The storage backend to query
/// * `session_id` - The session to report on
pub fn load_report(store: &dyn SessionStore, session_id: i64) -> OutputResult<SessionReport> {
    let session = store.get_session(session_id)?;
    let transitions = store.get_transitions(session_id)?;
    let visited_urls = store.get_visited_urls(session_id)?;

    Ok(SessionReport {
        session,
        transitions,
        visited_urls,
    })
}

/// Loads the report data for the most recent session, if any
pub fn load_latest_report(store: &dyn SessionStore) -> OutputResult<Option<SessionReport>> {
    match store.get_latest_session()? {
        Some(session) => {
            let report = load_report(store, session.id)?;
            Ok(Some(report))
        }
        None => Ok(None),
    }
}

/// Writes a markdown report to the given path
///
/// # Arguments
///
/// * `report` - The session report data
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_report(report: &SessionReport, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a session report as markdown
pub fn format_markdown_report(report: &SessionReport) -> String {
    let session = &report.session;
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Session Report: {}\n\n", session.label));

    // Session metadata
    md.push_str("## Session\n\n");
    md.push_str(&format!("- **Session ID**: {}\n", session.id));
    md.push_str(&format!("- **Started**: {}\n", session.started_at));
    if let Some(ended) = &session.ended_at {
        md.push_str(&format!("- **Ended**: {}\n", ended));
    }
    md.push_str(&format!(
        "- **Duration**: {} ms ({:.2} seconds)\n",
        session.duration_ms,
        session.duration_ms as f64 / 1000.0
    ));
    md.push_str(&format!("- **Status**: {}\n", session.status.to_db_string()));
    md.push_str(&format!("- **Config Hash**: {}\n\n", session.config_hash));

    // Pagination outcome
    md.push_str("## Pagination\n\n");
    md.push_str(&format!("- **Final Page**: {}\n", session.final_page));
    md.push_str(&format!(
        "- **Page Transitions**: {}\n",
        session.transition_count
    ));
    match (session.detection_kind, session.detection_confidence) {
        (Some(kind), Some(confidence)) => {
            md.push_str(&format!(
                "- **Last Detection**: {} (confidence {:.2})\n\n",
                kind, confidence
            ));
        }
        _ => md.push_str("- **Last Detection**: none\n\n"),
    }

    // Transition history
    if !report.transitions.is_empty() {
        md.push_str("## Transition History\n\n");
        md.push_str("| Page | URL | Captured |\n");
        md.push_str("|------|-----|----------|\n");
        for transition in &report.transitions {
            md.push_str(&format!(
                "| {} | {} | {} |\n",
                transition.page, transition.url, transition.captured_at
            ));
        }
        md.push('\n');
    }

    // Visited URLs
    md.push_str("## Visited URLs\n\n");
    md.push_str(&format!(
        "- **Unique URLs**: {}\n",
        session.unique_urls
    ));
    md.push_str(&format!(
        "- **Canonicalization Failures**: {}\n\n",
        session.parse_failures
    ));
    for url in &report.visited_urls {
        md.push_str(&format!("- {}\n", url));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DetectionKind;
    use crate::storage::SessionStatus;

    fn create_test_report() -> SessionReport {
        SessionReport {
            session: SessionRecord {
                id: 1,
                label: "product-listing".to_string(),
                started_at: "2026-02-01T10:00:00+00:00".to_string(),
                ended_at: Some("2026-02-01T10:05:00+00:00".to_string()),
                duration_ms: 300_000,
                final_page: 4,
                transition_count: 3,
                unique_urls: 4,
                parse_failures: 1,
                detection_kind: Some(DetectionKind::NextButton),
                detection_confidence: Some(0.85),
                config_hash: "deadbeef".to_string(),
                status: SessionStatus::Completed,
            },
            transitions: vec![TransitionRecord {
                id: 1,
                session_id: 1,
                page: 2,
                url: "https://example.com/list?page=2".to_string(),
                captured_at: "2026-02-01T10:01:00+00:00".to_string(),
            }],
            visited_urls: vec![
                "https://example.com/list".to_string(),
                "https://example.com/list?page=2".to_string(),
            ],
        }
    }

    #[test]
    fn test_report_contains_metadata() {
        let md = format_markdown_report(&create_test_report());

        assert!(md.contains("# Session Report: product-listing"));
        assert!(md.contains("- **Session ID**: 1"));
        assert!(md.contains("- **Status**: completed"));
        assert!(md.contains("- **Config Hash**: deadbeef"));
        assert!(md.contains("- **Duration**: 300000 ms (300.00 seconds)"));
    }

    #[test]
    fn test_report_contains_pagination_outcome() {
        let md = format_markdown_report(&create_test_report());

        assert!(md.contains("- **Final Page**: 4"));
        assert!(md.contains("- **Page Transitions**: 3"));
        assert!(md.contains("- **Last Detection**: next_button (confidence 0.85)"));
    }

    #[test]
    fn test_report_contains_transitions_and_urls() {
        let md = format_markdown_report(&create_test_report());

        assert!(md.contains("| 2 | https://example.com/list?page=2 |"));
        assert!(md.contains("- https://example.com/list\n"));
        assert!(md.contains("- **Canonicalization Failures**: 1"));
    }

    #[test]
    fn test_report_without_detection() {
        let mut report = create_test_report();
        report.session.detection_kind = None;
        report.session.detection_confidence = None;

        let md = format_markdown_report(&report);
        assert!(md.contains("- **Last Detection**: none"));
    }

    #[test]
    fn test_report_without_transitions_omits_table() {
        let mut report = create_test_report();
        report.transitions.clear();

        let md = format_markdown_report(&report);
        assert!(!md.contains("## Transition History"));
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.md");

        generate_markdown_report(&create_test_report(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("# Session Report: product-listing"));
    }
}
