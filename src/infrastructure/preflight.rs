// Startup reachability probe for the configured base URLs
use crate::infrastructure::errors::StartupError;
use crate::infrastructure::http_fetcher::describe;
use anyhow::{Context, Result};
use reqwest::{StatusCode, Url};
use std::time::Duration;

pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn probe_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .context("Failed to build preflight HTTP client")
}

/// The URL must be http(s) with a host and answer a HEAD with any status.
/// Servers that refuse HEAD with 405 get a GET instead.
pub async fn validate_base_url(client: &reqwest::Client, url: &str) -> Result<(), StartupError> {
    let parsed = Url::parse(url).map_err(|_| StartupError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(StartupError::InvalidUrl(url.to_string()));
    }

    let unreachable = |e: reqwest::Error| StartupError::Unreachable {
        url: url.to_string(),
        cause: describe(&e),
    };

    let response = client.head(parsed.clone()).send().await.map_err(unreachable)?;
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        tracing::debug!(url, "HEAD not allowed, retrying with GET");
        client.get(parsed).send().await.map_err(unreachable)?;
    }

    tracing::info!(url, "Base URL reachable");
    Ok(())
}
