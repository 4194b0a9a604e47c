//! Replay module for recorded traversal sessions
//!
//! A replay log is the serialized trace of the calls a page-traversal
//! driver made during a scraping run. Feeding it back through a fresh
//! session reproduces the session's tracking state without a browser in
//! the loop.

mod log;
mod runner;

pub use log::{load_replay_log, ReplayEvent, ReplayLog};
pub use runner::{replay_and_store, run_replay, ReplayOutcome};

use thiserror::Error;

/// Errors that can occur while loading a replay log
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read replay log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse replay log: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid replay log: {0}")]
    Validation(String),
}
