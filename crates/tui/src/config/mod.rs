use std::time::Duration;

use clap::Parser;
use screens::Currency;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub currency: Currency,
    /// JSON document with the dashboard figures.
    pub dashboard_path: String,
    pub log_file: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
    /// Unset means the HTTP client's own behavior.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            currency: Currency::Hnl,
            dashboard_path: "config/dashboard.json".to_string(),
            log_file: "cartera_tui.log".to_string(),
            level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Parser)]
#[command(name = "cartera_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://localhost:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override display currency (HNL, USD, EUR).
    #[arg(long)]
    currency: Option<String>,
    /// Override dashboard data file.
    #[arg(long)]
    dashboard: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

fn load_from(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CARTERA_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(currency) = args.currency {
        settings.currency = Currency::try_from(currency.as_str())?;
    }
    if let Some(dashboard) = args.dashboard {
        settings.dashboard_path = dashboard;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["cartera_tui", "--config", "does/not/exist.toml"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_without_file() {
        let settings = load_from(args(&[])).unwrap();
        assert_eq!(settings.currency, Currency::Hnl);
        assert_eq!(settings.dashboard_path, "config/dashboard.json");
        assert!(settings.request_timeout().is_none());
    }

    #[test]
    fn cli_overrides_win() {
        let settings = load_from(args(&[
            "--base-url",
            "http://10.0.0.2:9000",
            "--currency",
            "usd",
            "--log-file",
            "/tmp/cartera.log",
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.2:9000");
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.log_file, "/tmp/cartera.log");
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(load_from(args(&["--currency", "btc"])).is_err());
    }
}
