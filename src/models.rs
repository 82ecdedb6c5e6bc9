use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use utoipa::ToSchema;

// ============ Topics ============

/// Topic answering user lookups by `userId`.
pub const USER_TOPIC: &str = "user-service";
/// Topic answering media lookups by `mediaId`.
pub const MEDIA_TOPIC: &str = "media-service";
/// Topic answering genre lookups by `reviewId`.
pub const GENRE_TOPIC: &str = "genre-service";

pub const USER_NOT_FOUND: &str = "User not found";
pub const MEDIA_NOT_FOUND: &str = "Media not found";

// ============ Database Models ============

/// A stored review, as written by the external review writer.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Review {
    /// Unique, immutable identifier.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Owning user.
    pub user_fk: i64,
    /// Reviewed media.
    pub media_fk: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============ Topic Payloads ============

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRequest {
    pub media_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreRequest {
    pub review_id: i64,
}

// ============ API Response Models ============

/// A review merged with its user, media and genre data.
///
/// Built per request and never stored. `user` and `media` always hold either
/// the downstream payload or an `{"error": ...}` placeholder, and `genres` is
/// always an array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedReview {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// User-service payload, or `{"error": "User not found"}`.
    #[schema(value_type = Object)]
    pub user: Value,
    /// Media-service payload, or `{"error": "Media not found"}`.
    #[schema(value_type = Object)]
    pub media: Value,
    /// Genre-service payload, possibly empty.
    #[schema(value_type = Vec<Object>)]
    pub genres: Vec<Value>,
}

impl EnrichedReview {
    /// Merges a stored review with the raw downstream answers.
    ///
    /// `None` and empty payloads are replaced by the field's placeholder.
    pub fn assemble(
        review: Review,
        user: Option<Value>,
        media: Option<Value>,
        genres: Option<Value>,
    ) -> Self {
        Self {
            id: review.id,
            title: review.title,
            description: review.description,
            created_at: review.created_at,
            updated_at: review.updated_at,
            user: non_empty(user).unwrap_or_else(|| placeholder(USER_NOT_FOUND)),
            media: non_empty(media).unwrap_or_else(|| placeholder(MEDIA_NOT_FOUND)),
            genres: match non_empty(genres) {
                Some(Value::Array(items)) => items,
                Some(single) => vec![single],
                None => Vec::new(),
            },
        }
    }
}

/// `{"error": message}` used in place of a missing payload.
pub fn placeholder(message: &str) -> Value {
    json!({ "error": message })
}

/// Whether a downstream payload carries nothing usable.
///
/// `null`, `false`, `0`, `""`, `{}` and `[]` all count as empty.
pub fn is_empty_payload(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn non_empty(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !is_empty_payload(v))
}
