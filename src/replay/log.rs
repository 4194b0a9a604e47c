use crate::replay::ReplayError;
use crate::session::DetectionKind;
use serde::Deserialize;
use std::path::Path;

/// A single recorded traversal event
///
/// Events mirror the calls a live driver makes: a dedup check before
/// following a candidate link (`visit`), a classifier outcome
/// (`detection`), a confirmed navigation (`advance`), and the session
/// boundaries (`start`/`end`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ReplayEvent {
    /// Session start, optionally on an initial page
    Start {
        #[serde(default)]
        url: Option<String>,
    },

    /// Candidate next-page link the driver considered
    Visit { url: String },

    /// Page-type classification outcome
    Detection {
        kind: DetectionKind,
        confidence: f64,
        #[serde(default)]
        page: Option<u32>,
    },

    /// Confirmed navigation to the pending candidate
    Advance,

    /// Session end
    End,
}

/// A recorded traversal event log
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayLog {
    #[serde(rename = "event", default)]
    pub events: Vec<ReplayEvent>,
}

/// Loads and parses a replay log from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML replay log file
///
/// # Returns
///
/// * `Ok(ReplayLog)` - Successfully loaded log with at least one event
/// * `Err(ReplayError)` - Failed to load or parse the log
pub fn load_replay_log(path: &Path) -> Result<ReplayLog, ReplayError> {
    let content = std::fs::read_to_string(path)?;

    let log: ReplayLog = toml::from_str(&content)?;

    if log.events.is_empty() {
        return Err(ReplayError::Validation(
            "replay log contains no events".to_string(),
        ));
    }

    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_log(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_log() {
        let log_content = r#"
[[event]]
type = "start"
url = "https://example.com/list"

[[event]]
type = "visit"
url = "https://example.com/list?page=2"

[[event]]
type = "advance"

[[event]]
type = "detection"
kind = "numbered-links"
confidence = 0.9
page = 2

[[event]]
type = "end"
"#;

        let file = create_temp_log(log_content);
        let log = load_replay_log(file.path()).unwrap();

        assert_eq!(log.events.len(), 5);
        assert_eq!(
            log.events[0],
            ReplayEvent::Start {
                url: Some("https://example.com/list".to_string())
            }
        );
        assert_eq!(log.events[2], ReplayEvent::Advance);
        assert_eq!(
            log.events[3],
            ReplayEvent::Detection {
                kind: DetectionKind::NumberedLinks,
                confidence: 0.9,
                page: Some(2),
            }
        );
        assert_eq!(log.events[4], ReplayEvent::End);
    }

    #[test]
    fn test_start_url_optional() {
        let file = create_temp_log("[[event]]\ntype = \"start\"\n");
        let log = load_replay_log(file.path()).unwrap();
        assert_eq!(log.events[0], ReplayEvent::Start { url: None });
    }

    #[test]
    fn test_detection_page_optional() {
        let log_content = r#"
[[event]]
type = "detection"
kind = "infinite-scroll"
confidence = 0.4
"#;
        let file = create_temp_log(log_content);
        let log = load_replay_log(file.path()).unwrap();
        assert_eq!(
            log.events[0],
            ReplayEvent::Detection {
                kind: DetectionKind::InfiniteScroll,
                confidence: 0.4,
                page: None,
            }
        );
    }

    #[test]
    fn test_empty_log_rejected() {
        let file = create_temp_log("");
        let result = load_replay_log(file.path());
        assert!(matches!(result, Err(ReplayError::Validation(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let file = create_temp_log("[[event]\ntype = oops");
        let result = load_replay_log(file.path());
        assert!(matches!(result, Err(ReplayError::Parse(_))));
    }

    #[test]
    fn test_unknown_event_type_rejected() {
        let file = create_temp_log("[[event]]\ntype = \"teleport\"\n");
        let result = load_replay_log(file.path());
        assert!(matches!(result, Err(ReplayError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_replay_log(Path::new("/nonexistent/log.toml"));
        assert!(matches!(result, Err(ReplayError::Io(_))));
    }
}
