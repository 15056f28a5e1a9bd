//! Configured REST client for the browser.
//!
//! The API base URL is fixed at build time from `SHOP_API_BASE_URL`, falling
//! back to the hosted API. Clients are cheap to build (unit transport and
//! storage handles), so callers construct one per action.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use shop::ApiClient;
use shop::config::api_base_url_or_default;

use super::transport::GlooTransport;
use crate::util::storage::BrowserStorage;

pub type ShopClient = ApiClient<GlooTransport, BrowserStorage>;

/// Base URL baked in at compile time.
pub fn api_base_url() -> String {
    api_base_url_or_default(option_env!("SHOP_API_BASE_URL"))
}

pub fn shop_client() -> ShopClient {
    ApiClient::new(api_base_url(), GlooTransport, BrowserStorage)
}
