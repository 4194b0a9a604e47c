use crate::url::NormalizeOptions;
use serde::Deserialize;

/// Main configuration structure for Pagetrail
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub session: SessionConfig,
    #[serde(default)]
    pub normalize: NormalizeOptions,
    pub output: OutputConfig,
}

/// Session identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Label recorded with each persisted session (e.g. the job name)
    pub label: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite session database file
    #[serde(rename = "database-path")]
    pub database_path: String,

    /// Path to the markdown session report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}
