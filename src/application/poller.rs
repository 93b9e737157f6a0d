// Poller - concurrent fan-out over a widget's endpoints
use crate::application::fetcher::EndpointFetcher;
use crate::domain::response::{Endpoint, ResponseSet};
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Poller {
    fetcher: Arc<dyn EndpointFetcher>,
    endpoints: Vec<Endpoint>,
    in_flight: AtomicBool,
}

impl Poller {
    pub fn new(fetcher: Arc<dyn EndpointFetcher>, endpoints: Vec<Endpoint>) -> Self {
        Self {
            fetcher,
            endpoints,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch every endpoint concurrently and wait for all of them to settle.
    ///
    /// Returns `None` without fetching when a tick is already running.
    pub async fn tick(&self) -> Option<ResponseSet> {
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::debug!(endpoints = self.endpoints.len(), "Tick already in flight, skipping");
            return None;
        };

        let fetches = self.endpoints.iter().map(|endpoint| async move {
            let response = self.fetcher.fetch(&endpoint.url).await;
            if let Err(e) = &response {
                tracing::warn!(source = endpoint.source, url = %endpoint.url, error = %e, "Fetch failed");
            }
            (endpoint.clone(), response)
        });

        let responses: ResponseSet = join_all(fetches).await.into_iter().collect();

        tracing::debug!(
            endpoints = responses.len(),
            failures = responses.failures(),
            "Tick completed"
        );

        Some(responses)
    }
}

/// Clears the in-flight flag on drop, including when the tick is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::extractor::Extractor;
    use crate::domain::node_config::ConfigExtractor;
    use crate::domain::response::{FetchError, RawResponse};
    use crate::domain::status::StatusExtractor;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;
    use tokio::sync::{Barrier, Semaphore};

    /// Canned responses per URL; unknown URLs fail with a network error.
    #[derive(Default)]
    pub(crate) struct FakeFetcher {
        pub responses: HashMap<String, RawResponse>,
        pub gate: Option<Arc<Semaphore>>,
        pub barrier: Option<Arc<Barrier>>,
    }

    impl FakeFetcher {
        pub fn with(responses: impl IntoIterator<Item = (String, RawResponse)>) -> Self {
            Self {
                responses: responses.into_iter().collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl EndpointFetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> RawResponse {
            if let Some(barrier) = &self.barrier {
                barrier.wait().await;
            }
            if let Some(gate) = &self.gate {
                let _permit = gate.acquire().await;
            }
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::NetworkError("connection refused".to_string())))
        }
    }

    #[tokio::test]
    async fn test_tick_has_one_entry_per_endpoint() {
        let extractor = ConfigExtractor::new("http://api", "http://metrics");
        let endpoints = extractor.endpoints();
        let fetcher = FakeFetcher::with([(endpoints[0].url.clone(), Ok(json!({})))]);
        let poller = Poller::new(Arc::new(fetcher), endpoints.clone());

        let responses = poller.tick().await.unwrap();
        assert_eq!(responses.len(), 2);
        assert!(matches!(responses.get(&endpoints[0]), Some(Ok(_))));
        assert!(matches!(
            responses.get(&endpoints[1]),
            Some(Err(FetchError::NetworkError(_)))
        ));
    }

    #[tokio::test]
    async fn test_fetches_run_concurrently() {
        // Both fetches must be waiting at the same time for the barrier to open.
        let endpoints = vec![
            Endpoint::new("a", "http://x", "/a"),
            Endpoint::new("b", "http://x", "/b"),
        ];
        let fetcher = FakeFetcher {
            barrier: Some(Arc::new(Barrier::new(2))),
            ..FakeFetcher::default()
        };
        let poller = Poller::new(Arc::new(fetcher), endpoints);

        let responses = tokio::time::timeout(Duration::from_secs(2), poller.tick())
            .await
            .expect("fan-out did not run concurrently")
            .unwrap();
        assert_eq!(responses.len(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_tick_is_skipped() {
        let gate = Arc::new(Semaphore::new(0));
        let endpoint = Endpoint::new("a", "http://x", "/a");
        let fetcher = FakeFetcher {
            responses: HashMap::from([(endpoint.url.clone(), Ok(json!({"ok": true})))]),
            gate: Some(gate.clone()),
            ..FakeFetcher::default()
        };
        let poller = Arc::new(Poller::new(Arc::new(fetcher), vec![endpoint]));

        let first = tokio::spawn({
            let poller = poller.clone();
            async move { poller.tick().await }
        });
        while !poller.is_in_flight() {
            tokio::task::yield_now().await;
        }

        assert!(poller.tick().await.is_none());

        gate.add_permits(1);
        let responses = first.await.unwrap().unwrap();
        assert_eq!(responses.failures(), 0);
        assert!(!poller.is_in_flight());
        assert!(poller.tick().await.is_some());
    }

    #[tokio::test]
    async fn test_timed_out_endpoint_does_not_spoil_siblings() {
        let status = StatusExtractor::new("http://api");
        let config = ConfigExtractor::new("http://api", "http://metrics");
        let status_endpoint = status.endpoints().remove(0);
        let metrics_endpoint = config.endpoints().remove(0);

        let fetcher = FakeFetcher::with([
            (
                status_endpoint.url.clone(),
                Ok(json!({"serviceStatus": "running"})),
            ),
            (
                metrics_endpoint.url.clone(),
                Err(FetchError::NetworkError("operation timed out".to_string())),
            ),
        ]);
        let poller = Poller::new(
            Arc::new(fetcher),
            vec![status_endpoint, metrics_endpoint],
        );

        let responses = poller.tick().await.unwrap();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.failures(), 1);

        let summary = status.extract(&responses).unwrap();
        assert_eq!(summary.status.as_deref(), Some("running"));
    }
}
