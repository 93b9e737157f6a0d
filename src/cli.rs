use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(author, version, about = "Terminal dashboard for a Synchronizer node", long_about = None)]
pub struct Cli {
    /// API server base URL
    #[arg(long, short = 's', alias = "s", value_name = "URL")]
    pub server: Option<String>,

    /// Metrics server base URL
    #[arg(long, short = 'm', value_name = "URL")]
    pub metrics: Option<String>,

    /// Dashboard password (overrides dashboardPassword from the config file)
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Config file [default: ~/.synchronizer-cli/config.json]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file [default: ~/.synchronizer-cli/dashboard.log]
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
