//! Configuration module for Pagetrail
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use pagetrail::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Session label: {}", config.session.label);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, OutputConfig, SessionConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
