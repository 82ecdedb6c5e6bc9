//! Read access to stored reviews.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::{AppError, ResultExt};
use crate::models::Review;

/// Fetches a review by id.
///
/// `Ok(None)` means the review does not exist; `Err` is reserved for the
/// store itself failing.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, AppError>;
}

/// `ReviewStore` backed by the `reviews` table in Postgres.
#[derive(Clone)]
pub struct PgReviewStore {
    pool: PgPool,
}

impl PgReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgReviewStore {
    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, AppError> {
        // The writer uses INTEGER keys and camelCase timestamp columns
        sqlx::query_as::<_, Review>(
            r#"
            SELECT id::BIGINT AS id, title, description,
                   user_fk::BIGINT AS user_fk, media_fk::BIGINT AS media_fk,
                   "createdAt" AS created_at, "updatedAt" AS updated_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("fetching review {}", id))
    }
}
