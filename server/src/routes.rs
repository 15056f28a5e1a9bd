//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Server-renders every client route through Leptos, serves the compiled
//! WASM/JS/CSS bundle from `<site_root>/pkg`, and answers `/healthz`. The
//! storefront API itself lives elsewhere; the browser calls it directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};

/// Leptos options from workspace metadata with the config's overrides.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn leptos_options(config: &ServerConfig) -> Result<LeptosOptions, ConfigError> {
    let conf = get_configuration(None).map_err(|e| ConfigError::Leptos(e.to_string()))?;
    let mut options = conf.leptos_options;
    options.site_addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    if let Some(site_root) = &config.site_root {
        options.site_root = Arc::from(site_root.to_string_lossy().as_ref());
    }
    Ok(options)
}

/// Leptos SSR app plus static bundle and health routes.
pub fn app(options: LeptosOptions) -> Router {
    let routes = generate_route_list(client::app::App);
    let site_root_path = PathBuf::from(options.site_root.as_ref());

    let leptos_router = Router::new()
        .leptos_routes(&options, routes, {
            let opts = options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(options);

    Router::new()
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
