use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::auth::RequestGate;
use crate::enrichment::ReviewEnricher;
use crate::errors::AppError;
use crate::models::EnrichedReview;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Review lookup and enrichment.
    pub enricher: ReviewEnricher,
    /// Gate applied to the review route.
    pub gate: Arc<dyn RequestGate>,
}

/// Health check endpoint.
///
/// Returns the service status and version. Not gated.
#[utoipa::path(
    get,
    path = "/health",
    tag = "ops",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "review-enrichment-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /review/:id
///
/// Fetches one review and enriches it with its user, media and genres.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `raw_id` - Path segment; must parse as a base-10 integer.
///
/// # Returns
///
/// * `Result<Json<EnrichedReview>, AppError>` - The enriched review, 404 when
///   absent, 400 for a malformed id, plain-text 500 on any other failure.
#[utoipa::path(
    get,
    path = "/review/{id}",
    tag = "reviews",
    params(("id" = i64, Path, description = "Review identifier")),
    responses(
        (status = 200, description = "Enriched review", body = EnrichedReview),
        (status = 400, description = "Malformed review ID", body = crate::api_docs::ErrorBody),
        (status = 401, description = "Rejected by the request gate", body = crate::api_docs::ErrorBody),
        (status = 404, description = "No review with this ID", body = crate::api_docs::ErrorBody),
        (status = 500, description = "Store or downstream failure", body = String, content_type = "text/plain")
    )
)]
pub async fn get_review(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<EnrichedReview>, AppError> {
    let id: i64 = raw_id
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid review ID: {}", raw_id)))?;

    tracing::info!("Fetching review with ID: {}", id);

    let review = state
        .enricher
        .get_enriched_review(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No review found with ID {}", id)))?;

    Ok(Json(review))
}
