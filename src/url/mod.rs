//! URL handling module for Pagetrail
//!
//! This module provides URL canonicalization so that equivalent addresses
//! compare equal when tracking visited pages.

mod normalize;

use serde::Deserialize;

// Re-export main functions
pub use normalize::{normalize_or_original, try_normalize_url};

/// Optional extras applied on top of the fixed canonicalization rules
///
/// Both default to off, so a default-constructed value leaves the URL's
/// query parameters and host untouched apart from sorting and slash/fragment
/// handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct NormalizeOptions {
    /// Drop `utm_*` and common click-tracking query parameters
    pub strip_tracking_params: bool,

    /// Drop a leading `www.` host label
    pub strip_www: bool,
}
