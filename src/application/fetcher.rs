// Fetcher trait for endpoint access
use crate::domain::response::RawResponse;
use async_trait::async_trait;

#[async_trait]
pub trait EndpointFetcher: Send + Sync {
    /// GET one absolute URL. Every outcome, including transport failures,
    /// comes back as a value; implementations never retry.
    async fn fetch(&self, url: &str) -> RawResponse;
}
