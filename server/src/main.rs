//! Storefront host: server-renders the Leptos shell and serves the bundle.

mod config;
mod routes;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;
    let options = routes::leptos_options(&config)?;
    let addr = options.site_addr;
    let app = routes::app(options);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bundled = client::net::api::api_base_url();
    if let Some(bundled) = config.bundle_mismatch(&bundled) {
        tracing::warn!(
            expected = %config.api_base_url,
            %bundled,
            "client bundle was built against a different SHOP_API_BASE_URL"
        );
    }
    tracing::info!(%addr, api_base_url = %bundled, "storefront listening");
    axum::serve(listener, app).await?;
    Ok(())
}
