//! Browser HTTP transport.
//!
//! Client-side (hydrate): real `fetch` calls via `gloo-net`.
//! Server-side (SSR): every request fails, since the storefront API is only
//! called from the browser and SSR renders the loading state.

#![allow(clippy::unused_async)]

use shop::{HttpRequest, HttpResponse, Transport};

#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::{Method as HttpMethod, RequestBuilder};

            let method = match request.method {
                shop::Method::Get => HttpMethod::GET,
                shop::Method::Post => HttpMethod::POST,
                shop::Method::Patch => HttpMethod::PATCH,
                shop::Method::Delete => HttpMethod::DELETE,
            };
            let mut builder = RequestBuilder::new(&request.url)
                .method(method)
                .header("Accept", "application/json");
            if let Some(token) = &request.bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let outgoing = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| e.to_string())?;

            let response = outgoing.send().await.map_err(|e| e.to_string())?;
            let status = response.status();
            let authorization = response.headers().get("Authorization");
            let body = response.text().await.map_err(|e| e.to_string())?;
            Ok(HttpResponse { status, authorization, body })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(format!(
                "{} {} is only available in the browser",
                request.method.as_str(),
                request.url
            ))
        }
    }
}
