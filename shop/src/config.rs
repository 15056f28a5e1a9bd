//! API base URL configuration.
//!
//! Every front end resolves one base URL up front and hands it to
//! [`crate::ApiClient::new`]. Trailing slashes are stripped so paths can be
//! appended verbatim.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Hosted API used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://shoptest-fmov.onrender.com";

/// Environment variable consulted by the server, the CLI and the client build.
pub const API_BASE_URL_ENV: &str = "SHOP_API_BASE_URL";

/// Trim whitespace and trailing slashes. Returns `None` for a blank value.
#[must_use]
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Normalized `raw`, or [`DEFAULT_API_BASE_URL`] when it is absent or blank.
#[must_use]
pub fn api_base_url_or_default(raw: Option<&str>) -> String {
    raw.and_then(normalize_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
}
