// Widget - a poller, an extractor and a state cell on one refresh schedule
use crate::application::fetcher::EndpointFetcher;
use crate::application::poller::Poller;
use crate::application::state::{Phase, WidgetState};
use crate::domain::extractor::Extractor;
use crate::domain::summary::Snapshot;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;

pub struct Widget<E: Extractor> {
    name: &'static str,
    poller: Poller,
    extractor: E,
    interval: Duration,
    state: WidgetState<E::Summary>,
}

impl<E: Extractor> Widget<E> {
    pub fn new(
        name: &'static str,
        fetcher: Arc<dyn EndpointFetcher>,
        extractor: E,
        interval: Duration,
        on_change: impl FnMut(&Snapshot<E::Summary>) + Send + 'static,
    ) -> Self {
        let poller = Poller::new(fetcher, extractor.endpoints());
        Self {
            name,
            poller,
            extractor,
            interval,
            state: WidgetState::new(on_change),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn snapshot(&self) -> Option<&Snapshot<E::Summary>> {
        self.state.current()
    }

    /// Enter the loading state so the first frame shows a placeholder.
    pub fn mount(&mut self) {
        self.state.set(Snapshot::Loading);
    }

    /// Run one tick. Returns `false` when it was skipped because another
    /// tick for this widget is still in flight.
    pub async fn refresh(&mut self) -> bool {
        let Some(responses) = self.poller.tick().await else {
            return false;
        };

        let snapshot = Snapshot::from(self.extractor.extract(&responses));
        if let Some(reason) = snapshot.error() {
            tracing::debug!(widget = self.name, error = reason, "Widget in error state");
        }
        if self.state.set(snapshot) {
            tracing::trace!(widget = self.name, "Widget state changed");
        }
        true
    }

    /// Mount, tick immediately, then tick every interval or whenever
    /// `refresh` is notified. Runs until the task is aborted.
    pub async fn run(mut self, refresh: Arc<Notify>) {
        tracing::info!(
            widget = self.name,
            interval_secs = self.interval.as_secs(),
            endpoints = self.poller.endpoints().len(),
            "Widget mounted"
        );
        self.mount();

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = refresh.notified() => {
                    tracing::debug!(widget = self.name, "Manual refresh");
                    ticker.reset();
                }
            }
            self.refresh().await;
        }
    }
}
