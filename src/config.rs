use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

/// Where the runner prices come from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Filesystem path or http(s) URL of the CSV
    #[serde(default = "default_location")]
    pub location: String,

    /// Fetch timeout in seconds (default: 30)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Re-fetch period in seconds, 0 disables (default: 0)
    #[serde(default)]
    pub refresh_interval_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            timeout_seconds: default_timeout_seconds(),
            refresh_interval_seconds: 0,
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_seconds > 0)
            .then(|| Duration::from_secs(self.refresh_interval_seconds))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Escape CSV field text before writing it into the page (default: true)
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            escape_html: default_escape_html(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_location() -> String {
    "data/runner_prices.csv".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_title() -> String {
    "CI runner prices".to_string()
}

fn default_escape_html() -> bool {
    true
}

/// Load configuration from a TOML file overlaid with `RUNNER_PRICES__*` env vars
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix("RUNNER_PRICES")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.source.location.trim().is_empty() {
        anyhow::bail!("source.location cannot be empty");
    }

    if cfg.source.timeout_seconds < 1 {
        anyhow::bail!("source.timeout_seconds must be >= 1");
    }

    match cfg.server.log_format.as_str() {
        "pretty" | "json" => {}
        other => anyhow::bail!("Invalid server.log_format: {} (expected pretty or json)", other),
    }

    if cfg.server.host.parse::<std::net::IpAddr>().is_err() {
        anyhow::bail!("Invalid server.host: {}", cfg.server.host);
    }

    Ok(())
}
