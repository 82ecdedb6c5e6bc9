use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api_docs::serve_openapi_spec;
use crate::auth::require_gate;
use crate::handlers::{self, AppState};

/// Builds the application router.
///
/// Only the review route sits behind the request gate; health and docs stay
/// open for probes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let protected_routes = Router::new()
        .route("/review/:id", get(handlers::get_review))
        .route_layer(middleware::from_fn_with_state(
            state.gate.clone(),
            require_gate,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(serve_openapi_spec))
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down");
        },
    }
}
