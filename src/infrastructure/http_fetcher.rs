// HTTP fetcher implementation - authenticated JSON GETs over reqwest
use crate::application::fetcher::EndpointFetcher;
use crate::domain::response::{FetchError, RawResponse};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use std::time::Duration;

pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared by every widget; the inner client pools connections.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    password: Option<String>,
}

impl HttpFetcher {
    pub fn new(password: Option<String>) -> Result<Self> {
        Self::with_timeout(password, FETCH_TIMEOUT)
    }

    pub fn with_timeout(password: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, password })
    }
}

#[async_trait]
impl EndpointFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> RawResponse {
        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(password) = &self.password {
            request = request.basic_auth("", Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::NetworkError(describe(&e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::AuthFailed);
        }
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::NetworkError(describe(&e)))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::InvalidBody(e.to_string()))
    }
}

/// reqwest's top-level message hides the cause; walk the source chain.
pub(crate) fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "Request timed out".to_string();
    }

    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
