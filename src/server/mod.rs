pub mod handlers;

use crate::config::MythogenConfig;
use crate::generator::ReligionGenerator;
use crate::store::ReligionStore;
use anyhow::{Context, Result};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReligionStore>,
    pub generator: Arc<ReligionGenerator>,
}

/// Build the API router with CORS, tracing and per-route request timeouts.
///
/// A single generation gets a budget covering the backend attempt plus its
/// single retry, with headroom. Variation batches run their calls
/// sequentially, so that route's budget scales with the largest allowed
/// batch; a hung backend still cannot pin a request forever.
pub fn router(state: AppState, backend_timeout_secs: u64) -> Router {
    let call_budget_secs = backend_timeout_secs * 2 + 5;
    let single_timeout = Duration::from_secs(call_budget_secs);
    let batch_timeout =
        Duration::from_secs(call_budget_secs * u64::from(handlers::MAX_VARIATIONS));

    let batch_routes = Router::new()
        .route("/religions/variations", post(handlers::generate_variations))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            batch_timeout,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/religions/generate", post(handlers::generate_religion))
        .route("/religions", get(handlers::list_religions))
        .route(
            "/religions/:id",
            get(handlers::get_religion).delete(handlers::delete_religion),
        )
        .route("/religions/:id/summary", get(handlers::religion_summary))
        .route("/religions/:id/expand", post(handlers::expand_religion))
        .route("/components/generate", post(handlers::generate_component))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            single_timeout,
        ))
        .merge(batch_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve the API until the cancellation token fires.
pub async fn serve(
    config: &MythogenConfig,
    state: AppState,
    cancel: CancellationToken,
) -> Result<()> {
    let app = router(state, config.request_timeout_secs);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}
