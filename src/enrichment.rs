//! Review enrichment workflow
//!
//! 1. Fetch the review from the store
//! 2. Request user, media and genres from their topics concurrently
//! 3. Substitute placeholders for empty answers
//! 4. Merge everything into an `EnrichedReview`
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{
    EnrichedReview, GenreRequest, MediaRequest, UserRequest, GENRE_TOPIC, MEDIA_TOPIC, USER_TOPIC,
};
use crate::review_store::ReviewStore;
use crate::topic_client::TopicClient;

/// What a failing topic request does to the whole enrichment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Any failing topic request fails the enrichment. No partial result.
    #[default]
    Strict,
    /// A failing topic request is logged and replaced by its placeholder.
    Degrade,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "degrade" => Ok(Self::Degrade),
            other => anyhow::bail!(
                "ENRICHMENT_FAILURE_POLICY must be 'strict' or 'degrade', got '{}'",
                other
            ),
        }
    }
}

/// Loads reviews and merges in their user, media and genre data.
#[derive(Clone)]
pub struct ReviewEnricher {
    store: Arc<dyn ReviewStore>,
    topics: Arc<dyn TopicClient>,
    policy: FailurePolicy,
}

impl ReviewEnricher {
    pub fn new(
        store: Arc<dyn ReviewStore>,
        topics: Arc<dyn TopicClient>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            store,
            topics,
            policy,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Fetches review `id` and enriches it.
    ///
    /// Returns `Ok(None)` when the review does not exist. Store failures
    /// propagate as-is. Topic failures propagate under
    /// [`FailurePolicy::Strict`] and become placeholders under
    /// [`FailurePolicy::Degrade`]; empty answers always become placeholders.
    pub async fn get_enriched_review(&self, id: i64) -> Result<Option<EnrichedReview>, AppError> {
        let Some(review) = self.store.fetch_review(id).await? else {
            tracing::info!("No review found with ID: {}", id);
            return Ok(None);
        };

        tracing::debug!("Fetched review from database: {:?}", review);

        let user = self.request(USER_TOPIC, UserRequest { user_id: review.user_fk });
        let media = self.request(MEDIA_TOPIC, MediaRequest { media_id: review.media_fk });
        let genres = self.request(GENRE_TOPIC, GenreRequest { review_id: review.id });

        let (user, media, genres) = match self.policy {
            // Dropping the remaining futures on the first error cancels their requests
            FailurePolicy::Strict => tokio::try_join!(user, media, genres)?,
            FailurePolicy::Degrade => {
                let (user, media, genres) = tokio::join!(user, media, genres);
                (
                    degrade(id, USER_TOPIC, user),
                    degrade(id, MEDIA_TOPIC, media),
                    degrade(id, GENRE_TOPIC, genres),
                )
            }
        };

        let enriched = EnrichedReview::assemble(review, user, media, genres);
        tracing::info!(
            "Enriched review {} ({} genre(s))",
            enriched.id,
            enriched.genres.len()
        );
        tracing::debug!("Enriched review: {:?}", enriched);

        Ok(Some(enriched))
    }

    async fn request<T: Serialize>(
        &self,
        topic: &str,
        body: T,
    ) -> Result<Option<Value>, AppError> {
        let payload = serde_json::to_value(body).map_err(|e| {
            AppError::InternalError(format!("Failed to encode {} request: {}", topic, e))
        })?;
        self.topics.request_topic(topic, payload).await
    }
}

fn degrade(review_id: i64, topic: &str, result: Result<Option<Value>, AppError>) -> Option<Value> {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(
                "{} failed for review {}, using placeholder: {}",
                topic,
                review_id,
                e
            );
            None
        }
    }
}
