//! Statistics generation from the session database
//!
//! This module provides functionality for extracting and displaying
//! aggregate statistics across all recorded sessions.

use crate::output::OutputResult;
use crate::storage::{SessionStatus, SessionStore};

/// Aggregate statistics over all recorded sessions
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Total number of recorded sessions
    pub total_sessions: u64,

    /// Sessions that ran to completion
    pub completed_sessions: u64,

    /// Sessions cut short without an end marker
    pub interrupted_sessions: u64,

    /// Total page transitions across all sessions
    pub total_transitions: u64,

    /// Total visited URLs across all sessions
    pub total_visited_urls: u64,
}

impl StoreStatistics {
    /// Average number of page transitions per session
    pub fn average_transitions(&self) -> f64 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        self.total_transitions as f64 / self.total_sessions as f64
    }
}

/// Loads statistics from storage
///
/// # Arguments
///
/// * `store` - The storage backend to query
///
/// # Returns
///
/// * `Ok(StoreStatistics)` - Successfully loaded statistics
/// * `Err(OutputError)` - Failed to query statistics
pub fn load_statistics(store: &dyn SessionStore) -> OutputResult<StoreStatistics> {
    let total_sessions = store.count_sessions()?;
    let completed_sessions = store.count_sessions_by_status(SessionStatus::Completed)?;
    let interrupted_sessions = store.count_sessions_by_status(SessionStatus::Interrupted)?;
    let total_transitions = store.count_transitions()?;
    let total_visited_urls = store.count_visited_urls()?;

    Ok(StoreStatistics {
        total_sessions,
        completed_sessions,
        interrupted_sessions,
        total_transitions,
        total_visited_urls,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Session Statistics ===\n");

    println!("Overview:");
    println!("  Total sessions: {}", stats.total_sessions);
    println!("  Completed: {}", stats.completed_sessions);
    println!("  Interrupted: {}", stats.interrupted_sessions);
    println!();

    println!("Activity:");
    println!("  Total page transitions: {}", stats.total_transitions);
    println!("  Total visited URLs: {}", stats.total_visited_urls);
    println!(
        "  Average transitions per session: {:.1}",
        stats.average_transitions()
    );
}
