//! SmartOilGauge Prometheus Exporter
//!
//! Scrapes tank levels from the SmartOilGauge web dashboard and exposes them as
//! Prometheus gauges.
//!
//! # Overview
//!
//! The dashboard has no public API. The exporter logs in through the site's HTML
//! form, calls the same AJAX endpoint the browser uses, and republishes the
//! per-tank readings. Expired sessions are detected from the response and repaired
//! with a single re-login per scrape.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   HTTPS + cookies   ┌──────────────┐
//! │ SmartOilGauge│ ◄────────────────►  │   Exporter   │
//! │  dashboard   │  login.php / ajax   │              │
//! └──────────────┘                     │  ┌────────┐  │      HTTP      ┌────────────┐
//!                                      │  │ Client │  │ ◄────────────► │ Prometheus │
//!                                      │  └────────┘  │   /metrics     └────────────┘
//!                                      │  ┌────────┐  │
//!                                      │  │Metrics │  │
//!                                      │  └────────┘  │
//!                                      └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`smartoil`] - Session, login flow, tank query and the scrape state machine
//! - [`collectors`] - Projection of scraped tanks onto gauges
//! - [`metrics`] - Prometheus metric definitions
//! - [`scheduler`] - Fixed-delay background scrape loop
//! - [`server`] - HTTP server
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use smartoilgauge_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     config.validate()?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod scheduler;
pub mod server;
pub mod smartoil;
