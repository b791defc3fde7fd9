//! HTTP server wiring for the public portfolio site.
//!
//! Serves the static marketing pages from disk and exposes a small JSON API:
//! published projects, published posts, and the contact form. All backend
//! traffic goes through the shared [`Gateway`] handle, which here carries
//! only the public API key and never signs in.
//!
//! [`Gateway`]: folio_gateway::Gateway

/// HTTP error mapping for API handlers.
pub mod error;
/// Content and contact-form handlers.
pub mod handlers;

pub use folio_core::{Config, models};

use axum::{
    http::header,
    routing::{get, post},
    Router,
};
use folio_gateway::SharedGateway;
use hyper::HeaderMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::path::Path;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: SharedGateway,
}

impl AppState {
    pub fn new(config: Config, gateway: SharedGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// API routes take precedence; anything else falls through to the static
/// page directory.
///
/// # Panics
/// Panics if static header values fail to parse (should not happen).
pub fn create_app(state: AppState) -> Router {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(header::X_CONTENT_TYPE_OPTIONS, "nosniff".parse().unwrap());
    default_headers.insert(header::X_FRAME_OPTIONS, "DENY".parse().unwrap());

    // The pages are public; the API accepts cross-origin reads so the
    // deployed pages can hit a separately-hosted API during development.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    // Unknown paths fall back to index.html so deep links into the pages
    // resolve client-side.
    let index = Path::new(&state.config.static_dir).join("index.html");
    let static_pages =
        ServeDir::new(&state.config.static_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .route("/api/projects", get(handlers::list_projects))
        .route("/api/posts", get(handlers::list_posts))
        .route("/api/contact", post(handlers::submit_contact))
        .fallback_service(static_pages)
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    default_headers
                        .get(header::X_CONTENT_TYPE_OPTIONS)
                        .unwrap()
                        .clone(),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    default_headers
                        .get(header::X_FRAME_OPTIONS)
                        .unwrap()
                        .clone(),
                )),
        )
}

/// Resolve the listener address from env var overrides and bind policy.
///
/// The default is loopback on the configured site port. `BIND` overrides
/// the address; non-loopback targets additionally require
/// `allow_public_access` (the `FOLIO_ALLOW_PUBLIC` flag), so a stray
/// override cannot expose a development instance.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.site_port));
    let requested = match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without FOLIO_ALLOW_PUBLIC; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

/// Run the server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
