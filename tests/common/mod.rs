//! In-memory stand-ins for the review store and topic client.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use review_enrichment_api::errors::AppError;
use review_enrichment_api::models::Review;
use review_enrichment_api::review_store::ReviewStore;
use review_enrichment_api::topic_client::TopicClient;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn sample_review(id: i64) -> Review {
    Review {
        id,
        title: "A slow burn".to_string(),
        description: "Takes its time, pays off".to_string(),
        user_fk: 7,
        media_fk: 9,
        created_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 5, 3, 18, 45, 0).unwrap(),
    }
}

/// Store holding at most a handful of reviews, or failing every lookup.
pub struct FakeStore {
    reviews: HashMap<i64, Review>,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn with(reviews: Vec<Review>) -> Self {
        Self {
            reviews: reviews.into_iter().map(|r| (r.id, r)).collect(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            reviews: HashMap::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewStore for FakeStore {
    async fn fetch_review(&self, id: i64) -> Result<Option<Review>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        }
        Ok(self.reviews.get(&id).cloned())
    }
}

/// How a fake topic answers.
#[derive(Clone)]
pub enum Reply {
    Payload(Value),
    Empty,
    Fail,
}

/// Topic client answering from a fixed table and recording every request.
pub struct FakeTopics {
    replies: HashMap<String, Reply>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl FakeTopics {
    pub fn new(replies: &[(&str, Reply)]) -> Self {
        Self {
            replies: replies
                .iter()
                .map(|(topic, reply)| (topic.to_string(), reply.clone()))
                .collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        let mut requests = self.requests.lock().unwrap().clone();
        requests.sort_by(|a, b| a.0.cmp(&b.0));
        requests
    }
}

#[async_trait]
impl TopicClient for FakeTopics {
    async fn request_topic(&self, topic: &str, payload: Value) -> Result<Option<Value>, AppError> {
        self.requests
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        match self.replies.get(topic).cloned().unwrap_or(Reply::Empty) {
            Reply::Payload(value) => Ok(Some(value)),
            Reply::Empty => Ok(None),
            Reply::Fail => Err(AppError::ExternalApiError(format!("{} unavailable", topic))),
        }
    }
}
