// Domain layer - Summaries, extractors and fetch outcomes
pub mod extractor;
pub mod node_config;
pub mod payload;
pub mod performance;
pub mod points;
pub mod qos;
pub mod response;
pub mod status;
pub mod summary;
pub mod units;
