//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SessionStore
//! trait.

use crate::session::{DetectionKind, PageTransition, Session};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{SessionStore, StorageError, StorageResult};
use crate::storage::{SessionRecord, SessionStatus, TransitionRecord};
use crate::PagetrailError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite session storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(PagetrailError)` - Failed to open database
    pub fn new(path: &Path) -> Result<Self, PagetrailError> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        // Initialize schema
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> Result<Self, PagetrailError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn map_session_row(row: &Row<'_>) -> rusqlite::Result<SessionRecord> {
        Ok(SessionRecord {
            id: row.get(0)?,
            label: row.get(1)?,
            started_at: row.get(2)?,
            ended_at: row.get(3)?,
            duration_ms: row.get(4)?,
            final_page: row.get(5)?,
            transition_count: row.get(6)?,
            unique_urls: row.get(7)?,
            parse_failures: row.get(8)?,
            detection_kind: row
                .get::<_, Option<String>>(9)?
                .and_then(|s| DetectionKind::from_db_string(&s)),
            detection_confidence: row.get(10)?,
            config_hash: row.get(11)?,
            status: SessionStatus::from_db_string(&row.get::<_, String>(12)?)
                .unwrap_or(SessionStatus::Running),
        })
    }
}

const SESSION_COLUMNS: &str = "id, label, started_at, ended_at, duration_ms, final_page, \
     transition_count, unique_urls, parse_failures, detection_kind, detection_confidence, \
     config_hash, status";

impl SessionStore for SqliteStore {
    // ===== Session Lifecycle =====

    fn create_session(&mut self, label: &str, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO sessions (label, started_at, config_hash, status) VALUES (?1, ?2, ?3, ?4)",
            params![
                label,
                now,
                config_hash,
                SessionStatus::Running.to_db_string()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn finish_session(
        &mut self,
        session_id: i64,
        session: &Session,
        status: SessionStatus,
    ) -> StorageResult<()> {
        let pagination = session.pagination();
        let ended_at = pagination.ended_at().map(|t| t.to_rfc3339());
        let detection = pagination.last_detection();

        let updated = self.conn.execute(
            "UPDATE sessions SET ended_at = ?1, duration_ms = ?2, final_page = ?3,
             transition_count = ?4, unique_urls = ?5, parse_failures = ?6,
             detection_kind = ?7, detection_confidence = ?8, status = ?9
             WHERE id = ?10",
            params![
                ended_at,
                pagination.duration_ms(),
                pagination.current_page(),
                pagination.history().len() as u32,
                session.visited().len() as u32,
                session.visited().parse_failures() as u32,
                detection.map(|d| d.kind.to_db_string()),
                detection.map(|d| d.confidence),
                status.to_db_string(),
                session_id,
            ],
        )?;

        if updated == 0 {
            return Err(StorageError::SessionNotFound(session_id));
        }

        Ok(())
    }

    fn get_session(&self, session_id: i64) -> StorageResult<SessionRecord> {
        let sql = format!("SELECT {} FROM sessions WHERE id = ?1", SESSION_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        stmt.query_row(params![session_id], Self::map_session_row)
            .optional()?
            .ok_or(StorageError::SessionNotFound(session_id))
    }

    fn get_latest_session(&self) -> StorageResult<Option<SessionRecord>> {
        let sql = format!(
            "SELECT {} FROM sessions ORDER BY id DESC LIMIT 1",
            SESSION_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let session = stmt.query_row([], Self::map_session_row).optional()?;

        Ok(session)
    }

    fn list_sessions(&self) -> StorageResult<Vec<SessionRecord>> {
        let sql = format!("SELECT {} FROM sessions ORDER BY id ASC", SESSION_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let sessions = stmt
            .query_map([], Self::map_session_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sessions)
    }

    // ===== Transitions =====

    fn record_transition(
        &mut self,
        session_id: i64,
        transition: &PageTransition,
    ) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO transitions (session_id, page, url, captured_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id,
                transition.page,
                transition.url,
                transition.timestamp.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn get_transitions(&self, session_id: i64) -> StorageResult<Vec<TransitionRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, page, url, captured_at FROM transitions
             WHERE session_id = ?1 ORDER BY id ASC",
        )?;

        let transitions = stmt
            .query_map(params![session_id], |row| {
                Ok(TransitionRecord {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    page: row.get(2)?,
                    url: row.get(3)?,
                    captured_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(transitions)
    }

    // ===== Visited URLs =====

    fn record_visited_url(&mut self, session_id: i64, url: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO visited_urls (session_id, url) VALUES (?1, ?2)",
            params![session_id, url],
        )?;
        Ok(())
    }

    fn get_visited_urls(&self, session_id: i64) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT url FROM visited_urls WHERE session_id = ?1 ORDER BY url ASC",
        )?;

        let urls = stmt
            .query_map(params![session_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(urls)
    }

    // ===== Statistics =====

    fn count_sessions(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_sessions_by_status(&self, status: SessionStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sessions WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_transitions(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM transitions", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_visited_urls(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM visited_urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
