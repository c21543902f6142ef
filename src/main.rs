use anyhow::Result;
use clap::Parser;
use smartoilgauge_exporter::{
    config::{parse_interval, Config},
    server,
};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// The port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Address to bind to
    #[arg(short, long, env = "EXPORTER_ADDR", default_value = "0.0.0.0")]
    addr: String,

    /// The username for app.smartoilgauge.com
    #[arg(long, env = "SMARTOILGAUGE_USERNAME", hide_env_values = true)]
    username: Option<String>,

    /// The password for app.smartoilgauge.com
    #[arg(long, env = "SMARTOILGAUGE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// The interval at which to scrape the dashboard
    #[arg(long, default_value = "15m", value_parser = parse_interval)]
    scrape_interval: Duration,

    /// The path to serve metrics on
    #[arg(long, default_value = "/metrics")]
    metrics_path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SmartOilGauge Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    // Empty flags fall through to the file/env layers
    if let Some(username) = args.username.filter(|u| !u.is_empty()) {
        config.smartoil.username = username;
    }
    if let Some(password) = args.password.filter(|p| !p.is_empty()) {
        config.smartoil.password = secrecy::SecretString::from(password);
    }
    config.server.port = args.port;
    config.server.addr = args.addr;
    config.server.metrics_path = args.metrics_path;
    config.metrics.scrape_interval = args.scrape_interval;

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("Configuration loaded successfully");
    info!("SmartOilGauge account: {}", config.smartoil.username);
    info!(
        "Metrics endpoint: http://{}:{}{}",
        config.server.addr, config.server.port, config.server.metrics_path
    );

    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
