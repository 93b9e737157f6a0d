// Main entry point - settings resolution, startup checks and dashboard wiring
mod application;
mod cli;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;
use crate::infrastructure::config::{Settings, default_config_path, load_file_config};
use crate::infrastructure::http_fetcher::HttpFetcher;
use crate::infrastructure::{logging, preflight};
use crate::presentation::shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let file_config = load_file_config(&config_path)?;
    let settings = Settings::resolve(&cli, file_config)?;

    // Logs go to a file, the terminal is taken by the dashboard
    let _log_guard = logging::init(&settings.log_file)?;
    tracing::info!(
        api = %settings.api_base,
        metrics = %settings.metrics_base,
        config = %settings.config_path.display(),
        "Starting dashboard"
    );

    // Both servers must answer before the UI takes over the terminal
    let probe = preflight::probe_client()?;
    for url in [&settings.api_base, &settings.metrics_base] {
        preflight::validate_base_url(&probe, url).await.inspect_err(|e| {
            tracing::error!(url = %url, error = %e, "Preflight failed");
        })?;
    }

    let fetcher = Arc::new(HttpFetcher::new(Some(settings.password.clone()))?);

    shell::run(&settings, fetcher)
        .await
        .context("Dashboard terminal error")?;

    Ok(())
}
