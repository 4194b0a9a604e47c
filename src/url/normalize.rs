use crate::url::NormalizeOptions;
use crate::UrlError;
use url::Url;

/// Query parameters removed when `strip_tracking_params` is enabled
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
    "ref",
    "source",
];

/// Canonicalizes a URL string so equivalent addresses compare equal
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed or not HTTP(S)
/// 2. Optionally remove a leading `www.` from the host (`strip_www`)
/// 3. Strip a single trailing slash from the path (unless the path is just `/`)
/// 4. Remove the fragment (everything after `#`)
/// 5. Optionally remove tracking query parameters (`strip_tracking_params`)
/// 6. Sort remaining query parameters by key
/// 7. Remove an empty query string (trailing `?`)
///
/// The result is the reconstructed `origin + path + sorted-query`. Paginated
/// URLs that differ only in query-parameter order or a trailing path slash
/// (e.g. `/a/?page=2&sort=asc` vs `/a?sort=asc&page=2`) canonicalize to the
/// identical string, which is what prevents revisit loops during traversal.
///
/// # Arguments
///
/// * `url_str` - The URL string to canonicalize
/// * `options` - Optional extras (tracking-param and `www.` stripping)
///
/// # Returns
///
/// * `Ok(String)` - Canonical form of the URL
/// * `Err(UrlError)` - Failed to parse or canonicalize the URL
///
/// # Examples
///
/// ```
/// use pagetrail::url::{try_normalize_url, NormalizeOptions};
///
/// let options = NormalizeOptions::default();
/// let url = try_normalize_url("https://x.com/a/?b=2&a=1", &options).unwrap();
/// assert_eq!(url, "https://x.com/a?a=1&b=2");
/// ```
pub fn try_normalize_url(url_str: &str, options: &NormalizeOptions) -> Result<String, UrlError> {
    // Step 1: Parse and check the scheme
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    // Step 2: Optionally remove the www. prefix (the parser has already
    // lowercased the host)
    if options.strip_www {
        let stripped = url
            .host_str()
            .and_then(|host| host.strip_prefix("www."))
            .map(str::to_string);
        if let Some(host) = stripped {
            url.set_host(Some(&host))
                .map_err(|e| UrlError::Parse(e.to_string()))?;
        }
    }

    // Step 3: Strip a single trailing slash, keeping the root path intact
    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }

    // Step 4: Remove fragment
    url.set_fragment(None);

    // Steps 5 & 6: Filter and sort query parameters
    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url, options);

        // Step 7: Set query or remove if empty
        if params.is_empty() {
            url.set_query(None);
        } else {
            let query_string = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query_string));
        }
    }

    Ok(url.into())
}

/// Fail-open canonicalization: returns the input unchanged when it cannot be
/// parsed as an HTTP(S) URL
///
/// Callers that need to distinguish "already canonical" from "failed to
/// parse" should use [`try_normalize_url`] instead.
pub fn normalize_or_original(url_str: &str, options: &NormalizeOptions) -> String {
    try_normalize_url(url_str, options).unwrap_or_else(|_| url_str.to_string())
}

/// Optionally filters tracking parameters and sorts the rest by key
///
/// The sort is stable, so repeated keys keep their relative value order.
fn filter_and_sort_query_params(url: &Url, options: &NormalizeOptions) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !(options.strip_tracking_params && is_tracking_param(key)))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    params.sort_by(|a, b| a.0.cmp(&b.0));

    params
}

/// Checks if a query parameter is a tracking parameter
fn is_tracking_param(key: &str) -> bool {
    // Check exact matches
    if TRACKING_PARAMS.contains(&key) {
        return true;
    }

    // Check for utm_* prefix (catches any utm parameter)
    if key.starts_with("utm_") {
        return true;
    }

    false
}
