use crate::enrichment::FailurePolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub topic_gateway_url: String,
    pub topic_gateway_token: Option<String>,
    pub topic_timeout_secs: u64,
    pub api_token: Option<String>, // None leaves the review route open
    pub failure_policy: FailurePolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a map so they
    /// never touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            database_url: lookup("DATABASE_URL")
                .or_else(|| lookup("DB_URL"))
                .ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                None => 10,
                Some(raw) => match raw.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => anyhow::bail!("DATABASE_MAX_CONNECTIONS must be a positive integer"),
                },
            },
            port: lookup("PORT")
                .unwrap_or_else(|| "3005".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            topic_gateway_url: lookup("TOPIC_GATEWAY_URL")
                .ok_or_else(|| anyhow::anyhow!("TOPIC_GATEWAY_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("TOPIC_GATEWAY_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("TOPIC_GATEWAY_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })?,
            topic_gateway_token: lookup("TOPIC_GATEWAY_TOKEN").filter(|s| !s.trim().is_empty()),
            topic_timeout_secs: match lookup("TOPIC_TIMEOUT_SECS") {
                None => 30,
                Some(raw) => match raw.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => anyhow::bail!("TOPIC_TIMEOUT_SECS must be a positive integer"),
                },
            },
            api_token: lookup("API_TOKEN").filter(|s| !s.trim().is_empty()),
            failure_policy: lookup("ENRICHMENT_FAILURE_POLICY")
                .map(|raw| raw.parse::<FailurePolicy>())
                .transpose()?
                .unwrap_or_default(),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database: {} (max {} connections)",
            redact_url(&config.database_url),
            config.database_max_connections
        );
        tracing::debug!("Topic gateway URL: {}", redact_url(&config.topic_gateway_url));
        tracing::debug!("Topic timeout: {}s", config.topic_timeout_secs);
        tracing::debug!("Enrichment failure policy: {:?}", config.failure_policy);
        if config.api_token.is_none() {
            tracing::warn!("API_TOKEN not set, /review/:id is not authenticated");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

/// Scheme and host of a URL, with credentials, path and query removed.
///
/// Everything up to the last `@` is dropped, so passwords containing `/` or
/// `@` never reach the logs.
pub fn redact_url(url: &str) -> String {
    let (scheme, rest) = url.split_once("://").unwrap_or(("", url));
    let host = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
    let host = host.split(|c| c == '/' || c == '?').next().unwrap_or_default();
    if scheme.is_empty() {
        host.to_string()
    } else {
        format!("{}://{}", scheme, host)
    }
}
