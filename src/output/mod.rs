//! Output module for session reporting
//!
//! This module turns persisted sessions into human-readable output:
//! markdown session reports and aggregate store statistics.

mod report;
mod stats;

pub use report::{
    format_markdown_report, generate_markdown_report, load_latest_report, load_report,
    SessionReport,
};
pub use stats::{load_statistics, print_statistics, StoreStatistics};

use thiserror::Error;

/// Errors that can occur while producing output
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
