// Extractor seam - reduces one tick of responses to a widget summary
use super::response::{Endpoint, ResponseSet};

pub trait Extractor: Send + Sync + 'static {
    type Summary: Clone + PartialEq + Send + Sync + 'static;

    /// Endpoints this widget polls, in the order errors are reported.
    fn endpoints(&self) -> Vec<Endpoint>;

    /// Pure and total: missing keys default, failed endpoints become an error.
    fn extract(&self, responses: &ResponseSet) -> Result<Self::Summary, String>;
}
