//! Public site entrypoint.

use folio_gateway::RestGateway;
use folio_site::{resolve_bind_address, serve_router, AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", err);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info,folio_site=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let gateway = Arc::new(RestGateway::new(
        config.api_url.clone(),
        config.api_key.clone(),
    ));
    let allow_public = folio_core::config::env_flag_enabled("FOLIO_ALLOW_PUBLIC");
    let addr = resolve_bind_address(&config, allow_public);
    let state = AppState::new(config, gateway);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("site listening on http://{}", listener.local_addr()?);

    serve_router(listener, state, shutdown_signal()).await?;
    Ok(())
}
