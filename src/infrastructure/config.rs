use crate::cli::Cli;
use crate::infrastructure::errors::StartupError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE: &str = "http://localhost:3000";
pub const DEFAULT_METRICS_BASE: &str = "http://localhost:3001";

const CONFIG_DIR: &str = ".synchronizer-cli";

/// The subset of the synchronizer-cli config file the dashboard reads.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    #[serde(rename = "dashboardPassword", alias = "dashboardpassword", default)]
    pub dashboard_password: Option<String>,
    #[serde(rename = "dashboardServer", alias = "dashboardserver", default)]
    pub dashboard_server: Option<String>,
    #[serde(rename = "dashboardMetrics", alias = "dashboardmetrics", default)]
    pub dashboard_metrics: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base: String,
    pub metrics_base: String,
    pub password: String,
    pub config_path: PathBuf,
    pub log_file: PathBuf,
}

impl Settings {
    /// Flag beats config file beats built-in default. There is no default
    /// password; without one the dashboard cannot start.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, StartupError> {
        let config_path = cli.config.clone().unwrap_or_else(default_config_path);

        let password = pick(cli.password.clone(), file.dashboard_password)
            .ok_or_else(|| StartupError::MissingCredentials(config_path.clone()))?;

        Ok(Self {
            api_base: pick(cli.server.clone(), file.dashboard_server)
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            metrics_base: pick(cli.metrics.clone(), file.dashboard_metrics)
                .unwrap_or_else(|| DEFAULT_METRICS_BASE.to_string()),
            password,
            log_file: cli
                .log_file
                .clone()
                .unwrap_or_else(|| config_dir().join("dashboard.log")),
            config_path,
        })
    }
}

fn pick(flag: Option<String>, file: Option<String>) -> Option<String> {
    flag.filter(|v| !v.is_empty())
        .or(file.filter(|v| !v.is_empty()))
}

pub fn config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(CONFIG_DIR)
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// A missing file is an empty config, not an error.
pub fn load_file_config(path: &Path) -> Result<FileConfig, StartupError> {
    let to_error = |source: config::ConfigError| StartupError::Config {
        path: path.to_path_buf(),
        source,
    };

    let settings = config::Config::builder()
        .add_source(
            config::File::from(path)
                .format(config::FileFormat::Json)
                .required(false),
        )
        .build()
        .map_err(to_error)?;

    settings.try_deserialize().map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli() -> Cli {
        Cli {
            config: Some(PathBuf::from("/tmp/config.json")),
            ..Cli::default()
        }
    }

    #[test]
    fn test_flag_beats_file_beats_default() {
        let file = FileConfig {
            dashboard_password: Some("from-file".to_string()),
            dashboard_server: Some("http://file:3000".to_string()),
            dashboard_metrics: None,
        };
        let cli = Cli {
            password: Some("from-flag".to_string()),
            ..cli()
        };

        let settings = Settings::resolve(&cli, file).unwrap();
        assert_eq!(settings.password, "from-flag");
        assert_eq!(settings.api_base, "http://file:3000");
        assert_eq!(settings.metrics_base, DEFAULT_METRICS_BASE);
        assert_eq!(settings.config_path, PathBuf::from("/tmp/config.json"));
    }

    #[test]
    fn test_missing_password_is_fatal() {
        let err = Settings::resolve(&cli(), FileConfig::default()).unwrap_err();
        assert!(matches!(err, StartupError::MissingCredentials(_)));

        let empty = FileConfig {
            dashboard_password: Some(String::new()),
            ..FileConfig::default()
        };
        assert!(Settings::resolve(&cli(), empty).is_err());
    }

    #[test]
    fn test_load_file_config_reads_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"dashboardPassword": "hunter2", "wallet": "0xabc", "extra": {{"nested": [1, 2]}}}}"#
        )
        .unwrap();

        let config = load_file_config(file.path()).unwrap();
        assert_eq!(config.dashboard_password.as_deref(), Some("hunter2"));
        assert_eq!(config.dashboard_server, None);
    }

    #[test]
    fn test_load_file_config_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_file_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_load_file_config_rejects_malformed_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = load_file_config(file.path()).unwrap_err();
        assert!(matches!(err, StartupError::Config { .. }));
    }
}
