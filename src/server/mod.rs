//! HTTP surface of the study-aid service.
//!
//! One generation endpoint plus a liveness probe. CORS is fully permissive
//! with credentials disabled: a development posture, not production-ready.
//!
//! Endpoints:
//!   POST /api/generate
//!   GET  /health

pub mod routes;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::client::SolarClient;

/// Shared state handed to every request handler.
///
/// Holds the one process-wide client, constructed at startup and injected
/// here; handlers hold no other state across requests.
#[derive(Clone)]
pub struct AppState {
    /// The shared completion client.
    pub client: Arc<SolarClient>,
}

impl AppState {
    /// Creates application state around a client.
    pub fn new(client: SolarClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Builds the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(routes::generate::generate))
        .route("/health", get(routes::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the router on the given listener until the process exits.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    let router = build_router(state);

    if let Ok(addr) = listener.local_addr() {
        info!("studyaid listening on http://{}", addr);
    }
    axum::serve(listener, router).await
}
