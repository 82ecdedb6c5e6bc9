use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::redact_url;

/// Opens the review database pool and checks it answers before serving.
pub async fn connect_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let target = redact_url(database_url);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .with_context(|| format!("connecting to review database at {}", target))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .with_context(|| format!("review database at {} did not answer", target))?;

    tracing::debug!("Connected to {} ({} connections max)", target, max_connections);
    Ok(pool)
}
