//! Review Enrichment API Library
//!
//! Serves stored reviews merged with user, media and genre data fetched
//! concurrently from downstream topics.
//!
//! # Modules
//!
//! - `api_docs`: OpenAPI document.
//! - `auth`: Request gate middleware.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `enrichment`: Review enrichment logic.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `logging`: Tracing subscriber setup.
//! - `models`: Review and enriched review models.
//! - `review_store`: Review lookup.
//! - `server`: Router assembly and shutdown signal.
//! - `topic_client`: Downstream topic request/reply client.

pub mod api_docs;
pub mod auth;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod review_store;
pub mod server;
pub mod topic_client;
