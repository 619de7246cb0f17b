//! Axum application setup.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;
use crate::web::static_handler;

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Review state
        .route("/state", get(handlers::get_state))
        .route("/reset", post(handlers::reset_state))
        // Table upload
        .route("/upload", post(handlers::upload))
        // Records
        .route("/next", get(handlers::next_record))
        .route("/keep", post(handlers::keep_record))
        .route("/skip", post(handlers::skip_record))
        // Export
        .route("/download", get(handlers::download));

    Router::new()
        .nest("/api", api_routes)
        .fallback(static_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(state: AppState, addr: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutting down");
}
