// Infrastructure layer - configuration, HTTP transport and logging
pub mod config;
pub mod errors;
pub mod http_fetcher;
pub mod logging;
pub mod preflight;
