//! Storage traits and error types
//!
//! This module defines the trait interface for session storage backends and
//! associated error types.

use crate::session::{PageTransition, Session};
use crate::storage::{SessionRecord, SessionStatus, TransitionRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Session not found: {0}")]
    SessionNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for session storage backend implementations
///
/// This trait defines all database operations needed to persist a traversal
/// session: its lifecycle row, its ordered page transitions, and its
/// visited-URL set.
pub trait SessionStore {
    // ===== Session Lifecycle =====

    /// Creates a new session row in the running state
    ///
    /// # Arguments
    ///
    /// * `label` - Human-readable session label from the configuration
    /// * `config_hash` - Hash of the configuration file
    ///
    /// # Returns
    ///
    /// The ID of the newly created session
    fn create_session(&mut self, label: &str, config_hash: &str) -> StorageResult<i64>;

    /// Finalizes a session row from the in-memory session state
    ///
    /// Copies the boundary timestamps, duration, final page, transition
    /// count, last detection, and visited-set counters into the row and
    /// sets the status.
    fn finish_session(
        &mut self,
        session_id: i64,
        session: &Session,
        status: SessionStatus,
    ) -> StorageResult<()>;

    /// Gets a session by ID
    fn get_session(&self, session_id: i64) -> StorageResult<SessionRecord>;

    /// Gets the most recent session
    fn get_latest_session(&self) -> StorageResult<Option<SessionRecord>>;

    /// Gets all sessions, oldest first
    fn list_sessions(&self) -> StorageResult<Vec<SessionRecord>>;

    // ===== Transitions =====

    /// Records a page transition for a session
    fn record_transition(
        &mut self,
        session_id: i64,
        transition: &PageTransition,
    ) -> StorageResult<()>;

    /// Gets all transitions for a session in capture order
    fn get_transitions(&self, session_id: i64) -> StorageResult<Vec<TransitionRecord>>;

    // ===== Visited URLs =====

    /// Records a visited URL for a session (idempotent)
    fn record_visited_url(&mut self, session_id: i64, url: &str) -> StorageResult<()>;

    /// Gets the visited URLs for a session, sorted
    fn get_visited_urls(&self, session_id: i64) -> StorageResult<Vec<String>>;

    // ===== Statistics =====

    /// Counts all sessions
    fn count_sessions(&self) -> StorageResult<u64>;

    /// Counts sessions with the given status
    fn count_sessions_by_status(&self, status: SessionStatus) -> StorageResult<u64>;

    /// Counts all recorded transitions
    fn count_transitions(&self) -> StorageResult<u64>;

    /// Counts all recorded visited URLs
    fn count_visited_urls(&self) -> StorageResult<u64>;
}
