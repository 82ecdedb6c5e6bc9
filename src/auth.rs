//! Request gate run ahead of protected handlers.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::errors::AppError;

/// Accepts or rejects a request before its handler runs.
pub trait RequestGate: Send + Sync {
    fn check(&self, headers: &HeaderMap) -> Result<(), AppError>;
}

/// Lets every request through. Used when no API token is configured.
pub struct OpenGate;

impl RequestGate for OpenGate {
    fn check(&self, _headers: &HeaderMap) -> Result<(), AppError> {
        Ok(())
    }
}

/// Requires `Authorization: Bearer <token>` with a fixed shared token.
pub struct BearerTokenGate {
    token: String,
}

impl BearerTokenGate {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl RequestGate for BearerTokenGate {
    fn check(&self, headers: &HeaderMap) -> Result<(), AppError> {
        let provided = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        if !constant_time_compare(provided.trim(), &self.token) {
            return Err(AppError::Unauthorized("Invalid bearer token".to_string()));
        }

        Ok(())
    }
}

/// Picks the gate matching the configured token.
pub fn gate_for(api_token: Option<&str>) -> Arc<dyn RequestGate> {
    match api_token {
        Some(token) => Arc::new(BearerTokenGate::new(token)),
        None => Arc::new(OpenGate),
    }
}

/// Middleware applying a [`RequestGate`]; use with `axum::middleware::from_fn_with_state`.
pub async fn require_gate(
    State(gate): State<Arc<dyn RequestGate>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate.check(request.headers())?;
    Ok(next.run(request).await)
}

/// Constant-time string comparison
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.as_bytes()
        .iter()
        .zip(b.as_bytes().iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
