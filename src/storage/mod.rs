//! Storage module for persisting traversal sessions
//!
//! This module handles all database operations for session tracking,
//! including:
//! - SQLite database initialization and schema management
//! - Session lifecycle persistence (create, finish)
//! - Page transition and visited-URL recording
//! - Aggregate counts for reporting

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{SessionStore, StorageError, StorageResult};

use crate::session::DetectionKind;
use crate::PagetrailError;

use std::path::Path;

/// Initializes or opens a session database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized storage
/// * `Err(PagetrailError)` - Failed to initialize storage
pub fn open_store(path: &Path) -> Result<SqliteStore, PagetrailError> {
    SqliteStore::new(path)
}

/// Represents a persisted session
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: i64,
    pub label: String,
    pub started_at: String,
    pub ended_at: Option<String>,
    pub duration_ms: i64,
    pub final_page: u32,
    pub transition_count: u32,
    pub unique_urls: u32,
    pub parse_failures: u32,
    pub detection_kind: Option<DetectionKind>,
    pub detection_confidence: Option<f64>,
    pub config_hash: String,
    pub status: SessionStatus,
}

/// Represents a persisted page transition
#[derive(Debug, Clone)]
pub struct TransitionRecord {
    pub id: i64,
    pub session_id: i64,
    pub page: u32,
    pub url: String,
    pub captured_at: String,
}

/// Status of a persisted session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Completed,
    Interrupted,
}

impl SessionStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Interrupted => "interrupted",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "interrupted" => Some(Self::Interrupted),
            _ => None,
        }
    }
}
