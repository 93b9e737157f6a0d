// Fetch outcome domain models
use serde_json::Value;
use std::collections::HashMap;

/// One remote URL a widget polls, labelled with the logical source it serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub source: &'static str,
    pub url: String,
}

impl Endpoint {
    pub fn new(source: &'static str, base: &str, path: &str) -> Self {
        Self {
            source,
            url: format!("{}{}", base.trim_end_matches('/'), path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    NetworkError(String),
    #[error("Authentication failed")]
    AuthFailed,
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("Invalid response body: {0}")]
    InvalidBody(String),
}

pub type RawResponse = Result<Value, FetchError>;

/// Responses for a single tick, keyed by endpoint URL.
#[derive(Debug, Clone, Default)]
pub struct ResponseSet {
    responses: HashMap<String, RawResponse>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, endpoint: &Endpoint, response: RawResponse) {
        self.responses.insert(endpoint.url.clone(), response);
    }

    pub fn get(&self, endpoint: &Endpoint) -> Option<&RawResponse> {
        self.responses.get(&endpoint.url)
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn failures(&self) -> usize {
        self.responses.values().filter(|r| r.is_err()).count()
    }

    /// Payloads for `endpoints` in order, or the first failure among them.
    ///
    /// With more than one endpoint the error names the source that failed.
    pub fn payloads<'a>(&'a self, endpoints: &[&Endpoint]) -> Result<Vec<&'a Value>, String> {
        let prefixed = endpoints.len() > 1;
        let mut payloads = Vec::with_capacity(endpoints.len());

        for endpoint in endpoints {
            let reason = match self.get(endpoint) {
                Some(Ok(payload)) => {
                    payloads.push(payload);
                    continue;
                }
                Some(Err(e)) => e.to_string(),
                None => "No response".to_string(),
            };

            return Err(if prefixed {
                format!("{}: {}", endpoint.source, reason)
            } else {
                reason
            });
        }

        Ok(payloads)
    }
}

impl FromIterator<(Endpoint, RawResponse)> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = (Endpoint, RawResponse)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (endpoint, response) in iter {
            set.insert(&endpoint, response);
        }
        set
    }
}
