//! OpenAPI document for the public routes.

use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::models::EnrichedReview;

/// `{"error": "..."}` body returned for client errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Review Enrichment API"),
    paths(crate::handlers::get_review, crate::handlers::health),
    components(schemas(EnrichedReview, ErrorBody)),
    tags(
        (name = "reviews", description = "Enriched review lookup"),
        (name = "ops", description = "Operational endpoints")
    )
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document as JSON.
pub async fn serve_openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
