// Startup errors - all fatal, reported before the terminal UI starts
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("dashboardPassword not found: pass --password or set it in {}", .0.display())]
    MissingCredentials(PathBuf),
    #[error("Invalid URL format: '{0}'\n    Must start with http:// or https://")]
    InvalidUrl(String),
    #[error("Cannot reach '{url}': {cause}")]
    Unreachable { url: String, cause: String },
    #[error("Failed to read config file {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },
}
