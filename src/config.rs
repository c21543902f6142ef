use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::error::ExporterError;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub smartoil: SmartOilConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SmartOilConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    /// Delay between the end of one scrape and the start of the next, e.g. "15m"
    #[serde(default = "default_scrape_interval", with = "humantime_serde_str")]
    pub scrape_interval: Duration,
}

fn default_base_url() -> String {
    "https://app.smartoilgauge.com".to_string()
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

fn default_request_timeout() -> u64 {
    30
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

fn default_scrape_interval() -> Duration {
    Duration::from_secs(15 * 60)
}

impl Default for SmartOilConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: String::new(),
            password: empty_secret(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            scrape_interval: default_scrape_interval(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("SMARTOILGAUGE_EXPORTER").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Check the settings the exporter cannot run without.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.smartoil.username.trim().is_empty() {
            return Err(ExporterError::Config(
                "--username is a required flag".to_string(),
            ));
        }
        if self.smartoil.password.expose_secret().is_empty() {
            return Err(ExporterError::Config(
                "--password is a required flag".to_string(),
            ));
        }
        if !self.server.metrics_path.starts_with('/') {
            return Err(ExporterError::Config(format!(
                "metrics path must start with '/', got {:?}",
                self.server.metrics_path
            )));
        }
        if self.metrics.scrape_interval.is_zero() {
            return Err(ExporterError::Config(
                "scrape interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses a humantime duration such as `"15m"` or `"90s"`.
pub fn parse_interval(input: &str) -> std::result::Result<Duration, String> {
    humantime::parse_duration(input).map_err(|e| format!("invalid duration {:?}: {}", input, e))
}

mod humantime_serde_str {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_interval(&raw).map_err(serde::de::Error::custom)
    }
}
