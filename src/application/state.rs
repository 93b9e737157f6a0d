// Widget state cell - assignment drives rendering
use crate::domain::summary::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
    Error,
}

pub type OnChange<S> = Box<dyn FnMut(&Snapshot<S>) + Send>;

/// Holds the latest snapshot of one widget and calls `on_change`
/// synchronously whenever an assignment replaces it with a different value.
pub struct WidgetState<S> {
    current: Option<Snapshot<S>>,
    on_change: OnChange<S>,
}

impl<S: PartialEq> WidgetState<S> {
    pub fn new(on_change: impl FnMut(&Snapshot<S>) + Send + 'static) -> Self {
        Self {
            current: None,
            on_change: Box::new(on_change),
        }
    }

    pub fn current(&self) -> Option<&Snapshot<S>> {
        self.current.as_ref()
    }

    pub fn phase(&self) -> Phase {
        match &self.current {
            None => Phase::Uninitialized,
            Some(Snapshot::Loading) => Phase::Loading,
            Some(Snapshot::Ready(_)) => Phase::Ready,
            Some(Snapshot::Error(_)) => Phase::Error,
        }
    }

    /// Replace the snapshot. Returns whether it changed (and `on_change` ran).
    pub fn set(&mut self, next: Snapshot<S>) -> bool {
        if self.current.as_ref() == Some(&next) {
            return false;
        }
        let current = self.current.insert(next);
        (self.on_change)(current);
        true
    }
}
