use std::sync::Arc;
use std::time::Duration;

use review_enrichment_api::auth::gate_for;
use review_enrichment_api::config::Config;
use review_enrichment_api::db::connect_pool;
use review_enrichment_api::enrichment::ReviewEnricher;
use review_enrichment_api::handlers::AppState;
use review_enrichment_api::logging::init_logging;
use review_enrichment_api::review_store::PgReviewStore;
use review_enrichment_api::server::{build_router, shutdown_signal};
use review_enrichment_api::topic_client::HttpTopicClient;

/// Main entry point for the application.
///
/// Initializes logging, configuration, the database pool and the topic
/// gateway client, then serves until Ctrl+C or SIGTERM.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Held until the end of main so buffered log lines are flushed on exit
    let _log_guard = init_logging();

    let config = Config::from_env()?;

    let pool = connect_pool(&config.database_url, config.database_max_connections).await?;
    tracing::info!("Database connection pool established");

    let topics = HttpTopicClient::new(
        config.topic_gateway_url.clone(),
        config.topic_gateway_token.clone(),
        Duration::from_secs(config.topic_timeout_secs),
    )?;
    tracing::info!("Topic client initialized: {}", config.topic_gateway_url);

    let enricher = ReviewEnricher::new(
        Arc::new(PgReviewStore::new(pool.clone())),
        Arc::new(topics),
        config.failure_policy,
    );
    tracing::info!("Review enricher ready (failure policy: {:?})", enricher.policy());

    let app_state = Arc::new(AppState {
        enricher,
        gate: gate_for(config.api_token.as_deref()),
    });

    let app = build_router(app_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}
