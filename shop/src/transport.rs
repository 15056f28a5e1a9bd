//! HTTP transport seam.
//!
//! The core never talks to a network stack directly. A [`Transport`] turns
//! one [`HttpRequest`] into one [`HttpResponse`]; status interpretation,
//! token refresh and body decoding stay in [`crate::api`].

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully resolved request. `url` is absolute.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Bearer token for the `Authorization` header, when the call is authenticated.
    pub bearer: Option<String>,
    /// JSON body; sent with `Content-Type: application/json`.
    pub body: Option<Value>,
}

/// What came back, before any interpretation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Raw `Authorization` response header.
    pub authorization: Option<String>,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Token carried by an `Authorization: Bearer <token>` response header.
    #[must_use]
    pub fn refreshed_token(&self) -> Option<&str> {
        let header = self.authorization.as_deref()?;
        let token = header.strip_prefix("Bearer ")?.trim();
        (!token.is_empty()).then_some(token)
    }
}

/// Sends one request. Implementations do not retry and impose no timeout;
/// a transport-level failure is reported as text.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns the transport's failure text when no HTTP response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}
