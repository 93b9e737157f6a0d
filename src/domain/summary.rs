// Widget snapshot domain model

/// Latest known state of one widget. Replaced wholesale on every tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Snapshot<T> {
    #[default]
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Snapshot<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Snapshot::Ready(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Snapshot::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for Snapshot<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(summary) => Snapshot::Ready(summary),
            Err(reason) => Snapshot::Error(reason),
        }
    }
}
