//! Pagetrail: traversal-session tracking for page scrapers
//!
//! This crate tracks what a page-traversal driver has already visited and
//! where it currently stands inside a paginated listing, so the driver can
//! avoid revisit loops and report on the session afterwards.

pub mod config;
pub mod output;
pub mod replay;
pub mod session;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Pagetrail operations
#[derive(Debug, Error)]
pub enum PagetrailError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Replay error: {0}")]
    Replay(#[from] replay::ReplayError),

    #[error("Report error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Pagetrail operations
pub type Result<T> = std::result::Result<T, PagetrailError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use session::{DetectionKind, DetectionResult, PaginationTracker, Session, VisitedSet};
pub use crate::url::{normalize_or_original, try_normalize_url, NormalizeOptions};
