//! Axum server setup and router configuration.

use crate::api;
use crate::config::runtime::OutputMode;
use crate::shutdown::shutdown_signal;
use crate::state::AppState;
use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the main application router.
///
/// In file output mode the QR directory is served under its URL prefix.
/// The mount is fixed for the life of the router.
pub fn build_router(state: AppState, qr_output: &OutputMode) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/payment", get(api::business::payment_page))
        .nest("/api", api::router());

    let router = match qr_output {
        OutputMode::File { dir, url_prefix } => {
            tracing::info!("Serving QR codes from {} at {}", dir.display(), url_prefix);
            router.nest_service(url_prefix, ServeDir::new(dir))
        }
        OutputMode::Inline => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Simple health check - returns OK if the server is running.
async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Run the server with graceful shutdown support.
pub async fn run_server(router: Router, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
