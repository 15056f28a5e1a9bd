//! Server configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The host only renders the storefront shell and serves its bundle, so its
//! configuration is small. Leptos options (output name, site root, reload
//! port) come from workspace metadata; the values here override the parts a
//! deployment is expected to change.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

use shop::config::{API_BASE_URL_ENV, DEFAULT_API_BASE_URL, normalize_base_url};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {value:?}")]
    InvalidPort { value: String },
    #[error("invalid SHOP_API_BASE_URL: {value:?}")]
    InvalidApiBaseUrl { value: String },
    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Overrides the Leptos `site_root` (directory holding `pkg/`).
    pub site_root: Option<PathBuf>,
    /// Expected API for this deployment. The browser bundle bakes its own
    /// URL in at build time, so this value is only reported and checked
    /// against it at startup (see [`Self::bundle_mismatch`]).
    pub api_base_url: String,
}

impl ServerConfig {
    /// Build typed config from the process environment.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITE_ROOT`: Leptos site root override
    /// - `SHOP_API_BASE_URL`: default hosted API
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Self::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        let site_root = lookup("SITE_ROOT")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let api_base_url = match lookup(API_BASE_URL_ENV) {
            Some(raw) if raw.trim().is_empty() => DEFAULT_API_BASE_URL.to_owned(),
            Some(raw) => normalize_base_url(&raw)
                .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
                .ok_or(ConfigError::InvalidApiBaseUrl { value: raw })?,
            None => DEFAULT_API_BASE_URL.to_owned(),
        };

        Ok(Self { port, site_root, api_base_url })
    }

    /// The bundle's compiled-in API URL when it differs from the one this
    /// deployment expects.
    #[must_use]
    pub fn bundle_mismatch<'a>(&self, bundled: &'a str) -> Option<&'a str> {
        (self.api_base_url != bundled).then_some(bundled)
    }
}
