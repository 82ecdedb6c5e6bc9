use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use uuid::Uuid;

use crate::errors::AppError;

/// Header carrying the id that ties a topic request to its reply.
pub const CORRELATION_HEADER: &str = "X-Correlation-Id";

/// Request/reply access to downstream topics.
///
/// `Ok(None)` means the downstream answered without data. `Err` means the
/// request itself failed.
#[async_trait]
pub trait TopicClient: Send + Sync {
    async fn request_topic(&self, topic: &str, payload: Value) -> Result<Option<Value>, AppError>;
}

/// Client for the HTTP front end of the request/reply broker.
///
/// Each topic request becomes `POST {base_url}/topics/{topic}/request`.
#[derive(Clone)]
pub struct HttpTopicClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTopicClient {
    /// Creates a new `HttpTopicClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Gateway base URL, without trailing slash.
    /// * `token` - Optional bearer token for the gateway.
    /// * `timeout` - Transport timeout applied to every request.
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create topic client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn topic_url(&self, topic: &str) -> String {
        format!("{}/topics/{}/request", self.base_url, topic)
    }
}

#[async_trait]
impl TopicClient for HttpTopicClient {
    async fn request_topic(&self, topic: &str, payload: Value) -> Result<Option<Value>, AppError> {
        let url = self.topic_url(topic);
        let correlation_id = Uuid::new_v4();
        tracing::debug!(%correlation_id, "Requesting topic {}: {}", topic, payload);

        let mut request = self
            .client
            .post(&url)
            .header(CORRELATION_HEADER, correlation_id.to_string())
            .json(&payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::ExternalApiError(format!("{} request failed: {}", topic, e))
        })?;

        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => {
                tracing::debug!(%correlation_id, "{} returned no data", topic);
                return Ok(None);
            }
            status if !status.is_success() => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(AppError::ExternalApiError(format!(
                    "{} returned {}: {}",
                    topic, status, error_text
                )));
            }
            _ => {}
        }

        let bytes = response.bytes().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to read {} response: {}", topic, e))
        })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            tracing::debug!(%correlation_id, "{} replied with an empty body", topic);
            return Ok(None);
        }

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse {} response: {}", topic, e))
        })?;

        tracing::debug!(%correlation_id, "{} replied", topic);
        Ok(match body {
            Value::Null => None,
            other => Some(other),
        })
    }
}
